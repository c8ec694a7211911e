use super::Error;

/// Error when creating a table that is already present.
#[derive(Debug)]
pub(super) struct TableExistsError {
    table: Box<str>,
}

impl std::error::Error for TableExistsError {}

impl core::fmt::Display for TableExistsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "table `{}` already exists", self.table)
    }
}

impl Error {
    /// Creates a table-exists error.
    pub fn table_exists(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TableExists(TableExistsError {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a table-exists error.
    pub fn is_table_exists(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::TableExists(_))
    }
}
