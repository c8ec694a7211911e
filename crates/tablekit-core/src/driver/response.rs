use crate::stmt::Value;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,

    /// Row identity the engine assigned to the last inserted row, when it
    /// reports one.
    pub last_insert_id: Option<i64>,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, one vector of column values per row
    Values(Vec<Vec<Value>>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
            last_insert_id: None,
        }
    }

    pub fn values(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Rows::Values(rows),
            last_insert_id: None,
        }
    }

    pub fn with_last_insert_id(mut self, id: i64) -> Self {
        self.last_insert_id = Some(id);
        self
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Number of rows impacted or returned.
    pub fn len(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Values(rows) => rows.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_count(self) -> crate::Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(_) => Err(crate::err!("expected a row count, got rows")),
        }
    }

    pub fn into_values(self) -> crate::Result<Vec<Vec<Value>>> {
        match self {
            Rows::Values(rows) => Ok(rows),
            Rows::Count(_) => Err(crate::err!("expected rows, got a row count")),
        }
    }
}
