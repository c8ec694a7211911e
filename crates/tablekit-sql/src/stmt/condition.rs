use super::Value;

/// Equality constraint on one column. A `Null` value matches `NULL` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub value: Value,
}
