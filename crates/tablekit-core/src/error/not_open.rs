use super::Error;

/// Error when a data operation is attempted outside an open session.
#[derive(Debug)]
pub(super) struct NotOpenError {
    operation: &'static str,
}

impl std::error::Error for NotOpenError {}

impl core::fmt::Display for NotOpenError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot run `{}`: storage is not open; open a session first",
            self.operation
        )
    }
}

impl Error {
    /// Creates a not-open error for the named operation.
    pub fn not_open(operation: &'static str) -> Error {
        Error::from(super::ErrorKind::NotOpen(NotOpenError { operation }))
    }

    /// Returns `true` if this error is a not-open error.
    pub fn is_not_open(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::NotOpen(_))
    }
}
