use super::Error;
use crate::schema::FieldType;

/// Error when a value cannot be stored in a field of the declared type.
#[derive(Debug)]
pub(super) struct TypeMismatchError {
    field: Box<str>,
    expected: FieldType,
    found: Box<str>,
}

impl std::error::Error for TypeMismatchError {}

impl core::fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type mismatch on field `{}`: expected {}, found {}",
            self.field, self.expected, self.found
        )
    }
}

impl Error {
    /// Creates a type mismatch error. `found` describes the offending value.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: FieldType,
        found: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatchError {
            field: field.into().into(),
            expected,
            found: found.into().into(),
        }))
    }

    /// Returns `true` if this error is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::TypeMismatch(_))
    }
}
