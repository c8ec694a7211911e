use super::Operation;
use crate::{schema::FieldType, stmt::Value};

/// A statement, already serialized for the connection's dialect.
#[derive(Debug, Clone)]
pub struct QuerySql {
    /// Statement text, with placeholders for `params`
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,

    /// When the statement returns rows, the type of each returned column.
    /// `None` for statements that only report a row count.
    pub ret: Option<Vec<FieldType>>,

    /// When `true`, the response reports the row identity the engine assigned
    /// to the inserted row.
    pub last_insert_id: bool,
}

impl QuerySql {
    /// A statement that does not return rows.
    pub fn execute(sql: impl Into<String>, params: Vec<Value>) -> QuerySql {
        QuerySql {
            sql: sql.into(),
            params,
            ret: None,
            last_insert_id: false,
        }
    }

    /// An insert, whose response carries the assigned row identity.
    pub fn insert(sql: impl Into<String>, params: Vec<Value>) -> QuerySql {
        QuerySql {
            sql: sql.into(),
            params,
            ret: None,
            last_insert_id: true,
        }
    }

    /// A statement returning rows whose columns have the types in `ret`.
    pub fn query(sql: impl Into<String>, params: Vec<Value>, ret: Vec<FieldType>) -> QuerySql {
        QuerySql {
            sql: sql.into(),
            params,
            ret: Some(ret),
            last_insert_id: false,
        }
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
