use super::Error;

/// Error when a schema declaration is malformed or self-inconsistent.
#[derive(Debug)]
pub(super) struct SchemaError {
    message: Box<str>,
}

impl std::error::Error for SchemaError {}

impl core::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates a schema error.
    ///
    /// Raised while a [`Schema`](crate::Schema) is being built, never once it exists.
    pub fn schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Schema(SchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema error.
    pub fn is_schema(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Schema(_))
    }
}
