use super::Statement;

use tablekit_core::schema::Schema;

/// Deletes every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
}

impl Statement {
    pub fn delete_all(schema: &Schema) -> Self {
        Delete {
            table: schema.table_name().to_string(),
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
