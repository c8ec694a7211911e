use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use tablekit_core::{
    schema::FieldType,
    stmt::{self, Value as CoreValue},
    Result,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a core value of type `ty`.
    ///
    /// Dates are stored as `YYYY-MM-DD` text. Integers read from a `REAL`
    /// column are widened.
    pub fn from_sql(row: &Row, index: usize, ty: FieldType) -> Result<Self> {
        let value: SqlValue = row
            .get(index)
            .map_err(tablekit_core::Error::storage_engine)?;

        let core_value = match (value, ty) {
            (SqlValue::Null, _) => stmt::Value::Null,
            (SqlValue::Integer(value), FieldType::Integer) => stmt::Value::I64(value),
            (SqlValue::Integer(value), FieldType::Real) => stmt::Value::F64(value as f64),
            (SqlValue::Real(value), FieldType::Real) => stmt::Value::F64(value),
            (SqlValue::Text(value), FieldType::Text) => stmt::Value::String(value),
            (SqlValue::Text(value), FieldType::Date) => {
                match stmt::Value::String(value).coerce(FieldType::Date) {
                    Some(date) => date,
                    None => tablekit_core::bail!("column {index} does not hold a valid DATE"),
                }
            }
            (SqlValue::Blob(value), FieldType::Blob) => stmt::Value::Bytes(value),
            (value, ty) => tablekit_core::bail!(
                "column {index} holds {:?} data, which cannot be read as {ty}",
                value.data_type()
            ),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            Value::Date(_) => Ok(ToSqlOutput::Owned(SqlValue::Text(self.0.to_text()))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}
