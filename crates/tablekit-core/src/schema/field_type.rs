use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Scalar storage types a field can be declared with.
///
/// A field type says how a value is held in memory ([`NativeKind`]); how it is
/// spelled in a `CREATE TABLE` statement depends on the target engine and is
/// looked up in a [`TypeRegistry`](super::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    /// Signed 64-bit integer
    Integer,

    /// 64-bit floating point number
    Real,

    /// UTF-8 text
    Text,

    /// Raw bytes
    Blob,

    /// Calendar date without a time zone
    Date,
}

/// The in-memory representation backing a [`FieldType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    I64,
    F64,
    String,
    Bytes,
    Date,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 5] = [
        FieldType::Integer,
        FieldType::Real,
        FieldType::Text,
        FieldType::Blob,
        FieldType::Date,
    ];

    /// The canonical name of the type, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Text => "TEXT",
            FieldType::Blob => "BLOB",
            FieldType::Date => "DATE",
        }
    }

    pub const fn native_kind(self) -> NativeKind {
        match self {
            FieldType::Integer => NativeKind::I64,
            FieldType::Real => NativeKind::F64,
            FieldType::Text => NativeKind::String,
            FieldType::Blob => NativeKind::Bytes,
            FieldType::Date => NativeKind::Date,
        }
    }
}

impl NativeKind {
    /// Name of the Rust type values of this kind are held in.
    pub const fn rust_type(self) -> &'static str {
        match self {
            NativeKind::I64 => "i64",
            NativeKind::F64 => "f64",
            NativeKind::String => "String",
            NativeKind::Bytes => "Vec<u8>",
            NativeKind::Date => "chrono::NaiveDate",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldType> {
        FieldType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unsupported_type(format!("`{s}` is not a known field type")))
    }
}

impl TryFrom<String> for FieldType {
    type Error = Error;

    fn try_from(value: String) -> Result<FieldType> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> String {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("integer".parse::<FieldType>().unwrap(), FieldType::Integer);
        assert_eq!(" Text ".parse::<FieldType>().unwrap(), FieldType::Text);
        assert_eq!("DATE".parse::<FieldType>().unwrap(), FieldType::Date);
    }

    #[test]
    fn parse_unknown_token() {
        let err = "VARCHAR".parse::<FieldType>().unwrap_err();
        assert!(err.is_unsupported_type());
        assert_eq!(
            err.to_string(),
            "unsupported type: `VARCHAR` is not a known field type"
        );
    }

    #[test]
    fn native_kinds() {
        assert_eq!(FieldType::Integer.native_kind().rust_type(), "i64");
        assert_eq!(FieldType::Blob.native_kind(), NativeKind::Bytes);
    }
}
