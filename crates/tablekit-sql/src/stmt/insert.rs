use super::{typed_value, Record, Statement, Value};

use tablekit_core::{schema::Schema, Error, Result};

/// Inserts one row.
///
/// `columns` and `values` line up. Columns are a subset of the schema's
/// fields, in declaration order; an empty set inserts a row of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl Statement {
    /// Inserts `record` into the table described by `schema`.
    ///
    /// Every field of the record must be declared by the schema and hold a
    /// value compatible with the field's type. Fields the record does not set
    /// are left to the engine.
    pub fn insert(schema: &Schema, record: &Record) -> Result<Self> {
        for (name, _) in record.iter() {
            if !schema.is_field(name) {
                return Err(Error::unknown_field(schema.table_name(), name));
            }
        }

        let mut columns = Vec::with_capacity(record.len());
        let mut values = Vec::with_capacity(record.len());

        for (name, _) in schema.fields() {
            if let Some(value) = record.get(name) {
                values.push(typed_value(schema, name, value.clone())?);
                columns.push(name.to_string());
            }
        }

        Ok(Insert {
            table: schema.table_name().to_string(),
            columns,
            values,
        }
        .into())
    }

    /// Builds one insert per record.
    ///
    /// Every record is validated before the batch is returned, so a batch is
    /// either entirely valid or rejected as a whole. The error for an invalid
    /// record carries its position, see [`Error::record_index`].
    pub fn insert_many(schema: &Schema, records: &[Record]) -> Result<Vec<Self>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Statement::insert(schema, record)
                    .map_err(|err| err.context(Error::batch_record(index)))
            })
            .collect()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
