mod query_sql;
pub use query_sql::QuerySql;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a SQL statement with bound values
    QuerySql(QuerySql),

    /// Start, commit or roll back a unit of work
    Transaction(Transaction),
}

impl Operation {
    pub fn is_query_sql(&self) -> bool {
        matches!(self, Operation::QuerySql(_))
    }

    pub fn is_transaction(&self) -> bool {
        matches!(self, Operation::Transaction(_))
    }
}
