use super::Statement;

use tablekit_core::schema::Schema;

/// A statement to drop a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    /// Name of the table.
    pub name: String,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops a table.
    ///
    /// This function _does not_ add an `IF EXISTS` clause.
    pub fn drop_table(schema: &Schema) -> Self {
        DropTable {
            name: schema.table_name().to_string(),
            if_exists: false,
        }
        .into()
    }

    /// Drops a table if it exists.
    ///
    /// This function _does_ add an `IF EXISTS` clause.
    pub fn drop_table_if_exists(schema: &Schema) -> Self {
        DropTable {
            name: schema.table_name().to_string(),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
