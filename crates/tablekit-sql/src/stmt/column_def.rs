/// One column clause of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Name of the column
    pub name: String,

    /// Engine column type token, as resolved by the type registry
    pub ty: String,
}
