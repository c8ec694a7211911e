use super::{Record, Value};

/// What to read from a table: which rows, in which order, and how many.
///
/// ```
/// use tablekit_sql::{Direction, Query};
///
/// let query = Query::new()
///     .filter("name", "John")
///     .order_by("age", Direction::Desc)
///     .limit(10);
///
/// assert_eq!(query.limit, Some(10));
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    /// Equality constraints, all of which a row must satisfy.
    pub filter: Record,

    /// Sort keys, most significant first.
    pub order_by: Vec<OrderBy>,

    /// Maximum number of rows the engine returns.
    pub limit: Option<u64>,

    /// Number of rows the engine skips before returning any.
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Query {
    /// A query returning every row.
    pub fn new() -> Query {
        Query::default()
    }

    /// Only return rows where `field` equals `value`.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Query {
        self.filter.set(field, value);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Query {
        self.order_by.push(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = Some(offset);
        self
    }
}

impl From<Record> for Query {
    fn from(filter: Record) -> Query {
        Query {
            filter,
            ..Query::default()
        }
    }
}
