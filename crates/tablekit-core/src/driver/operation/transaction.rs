use super::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a unit of work
    Start,

    /// Commit the unit of work
    Commit,

    /// Discard the unit of work
    Rollback,
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}
