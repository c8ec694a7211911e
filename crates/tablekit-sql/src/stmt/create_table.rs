use super::{ColumnDef, Statement};

use tablekit_core::{
    schema::{Schema, TypeRegistry},
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions, in schema declaration order
    pub columns: Vec<ColumnDef>,

    /// Primary key columns. Empty when the table has no primary key.
    pub primary_key: Vec<String>,

    /// One entry per `UNIQUE` clause
    pub unique_keys: Vec<Vec<String>>,
}

impl Statement {
    /// Creates the table described by `schema`, with column types resolved
    /// through `registry`.
    ///
    /// Fails with an unsupported type error if a field type has no token in
    /// the registry.
    pub fn create_table(schema: &Schema, registry: &TypeRegistry) -> Result<Self> {
        let columns = schema
            .fields()
            .map(|(name, ty)| {
                Ok(ColumnDef {
                    name: name.to_string(),
                    ty: registry.column_type(ty)?.to_string(),
                })
            })
            .collect::<Result<_>>()?;

        Ok(CreateTable {
            name: schema.table_name().to_string(),
            columns,
            primary_key: schema.primary_key().to_vec(),
            unique_keys: schema.unique_keys().to_vec(),
        }
        .into())
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
