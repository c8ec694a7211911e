use super::Error;

/// Error when a field type is not registered with the target engine, or a type
/// token does not name any known field type.
///
/// These errors are caught while a schema is declared or bound to a storage
/// engine, before any statement is produced.
#[derive(Debug)]
pub(super) struct UnsupportedTypeError {
    message: Box<str>,
}

impl std::error::Error for UnsupportedTypeError {}

impl core::fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported type: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported type error.
    pub fn unsupported_type(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedTypeError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported type error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnsupportedType(_))
    }
}
