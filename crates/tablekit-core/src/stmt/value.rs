use crate::schema::FieldType;

use chrono::NaiveDate;
use std::fmt::Write;

/// Largest magnitude an `i64` can have and still be represented exactly by an `f64`.
const MAX_EXACT_F64_INT: i64 = 1 << 53;

/// Format of dates in their canonical text form.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Absent value, stored as the engine's `NULL`
    #[default]
    Null,

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Calendar date
    Date(NaiveDate),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value can be stored as `ty` as it is, without any
    /// conversion. `Null` fits every type.
    pub fn is_a(&self, ty: FieldType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::I64(_), FieldType::Integer)
                | (Value::F64(_), FieldType::Real)
                | (Value::String(_), FieldType::Text)
                | (Value::Bytes(_), FieldType::Blob)
                | (Value::Date(_), FieldType::Date)
        )
    }

    /// Converts the value to `ty` when that loses nothing.
    ///
    /// Besides values that already are of the type, integers exactly
    /// representable as `f64` become reals and `YYYY-MM-DD` strings become dates.
    /// Returns `None` for anything else.
    pub fn coerce(self, ty: FieldType) -> Option<Value> {
        match (self, ty) {
            (value, ty) if value.is_a(ty) => Some(value),
            (Value::I64(v), FieldType::Real) if v.unsigned_abs() <= MAX_EXACT_F64_INT as u64 => {
                Some(Value::F64(v as f64))
            }
            (Value::String(v), FieldType::Date) => NaiveDate::parse_from_str(&v, DATE_FORMAT)
                .ok()
                .map(Value::Date),
            _ => None,
        }
    }

    /// Short description of the value's kind, used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::I64(_) => "INTEGER value",
            Value::F64(_) => "REAL value",
            Value::String(_) => "TEXT value",
            Value::Bytes(_) => "BLOB value",
            Value::Date(_) => "DATE value",
        }
    }

    /// The canonical text form of the value.
    ///
    /// Integers in decimal, reals in their shortest round-trip decimal form,
    /// text verbatim, bytes as lowercase hex, dates as `YYYY-MM-DD` and `Null`
    /// as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::I64(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Bytes(v) => v.iter().fold(String::with_capacity(v.len() * 2), |mut s, b| {
                let _ = write!(s, "{b:02x}");
                s
            }),
            Value::Date(v) => v.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(&v[..]),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match *self {
            Self::Date(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl From<&[u8]> for Value {
    fn from(src: &[u8]) -> Self {
        Self::Bytes(src.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(src: NaiveDate) -> Self {
        Self::Date(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}
