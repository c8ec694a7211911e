mod adhoc;
mod batch_record;
mod connection;
mod export;
mod not_open;
mod schema;
mod storage_engine;
mod table_exists;
mod table_not_found;
mod type_mismatch;
mod unknown_field;
mod unsupported_type;

use adhoc::AdhocError;
use batch_record::BatchRecordError;
use connection::ConnectionError;
use export::ExportError;
use not_open::NotOpenError;
use schema::SchemaError;
use std::sync::Arc;
use storage_engine::StorageEngineError;
use table_exists::TableExistsError;
use table_not_found::TableNotFoundError;
use type_mismatch::TypeMismatchError;
use unknown_field::UnknownFieldError;
use unsupported_type::UnsupportedTypeError;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while declaring, validating or operating on a table.
///
/// The error is one pointer wide. The kind predicates (`is_unknown_field`, ...)
/// look at the root cause, so adding context never hides what went wrong.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner)
            .expect("consequent error must not be shared")
            .cause = Some(self);
        err
    }

    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.inner.as_ref().and_then(|inner| inner.cause.as_ref()) {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    fn root_kind(&self) -> &ErrorKind {
        self.root().kind()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::StorageEngine(err) => Some(err),
            ErrorKind::Connection(err) => Some(err),
            ErrorKind::Export(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    BatchRecord(BatchRecordError),
    Connection(ConnectionError),
    Export(ExportError),
    NotOpen(NotOpenError),
    Schema(SchemaError),
    StorageEngine(StorageEngineError),
    TableExists(TableExistsError),
    TableNotFound(TableNotFoundError),
    TypeMismatch(TypeMismatchError),
    UnknownField(UnknownFieldError),
    UnsupportedType(UnsupportedTypeError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            BatchRecord(err) => core::fmt::Display::fmt(err, f),
            Connection(err) => core::fmt::Display::fmt(err, f),
            Export(err) => core::fmt::Display::fmt(err, f),
            NotOpen(err) => core::fmt::Display::fmt(err, f),
            Schema(err) => core::fmt::Display::fmt(err, f),
            StorageEngine(err) => core::fmt::Display::fmt(err, f),
            TableExists(err) => core::fmt::Display::fmt(err, f),
            TableNotFound(err) => core::fmt::Display::fmt(err, f),
            TypeMismatch(err) => core::fmt::Display::fmt(err, f),
            UnknownField(err) => core::fmt::Display::fmt(err, f),
            UnsupportedType(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown tablekit error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let mid = Error::from_args(format_args!("middle context"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn unknown_field_display() {
        let err = Error::unknown_field("users", "nickname");
        assert!(err.is_unknown_field());
        assert_eq!(err.to_string(), "unknown field `nickname` on table `users`");
    }

    #[test]
    fn type_mismatch_display() {
        let err = Error::type_mismatch("age", FieldType::Integer, "TEXT value");
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.to_string(),
            "type mismatch on field `age`: expected INTEGER, found TEXT value"
        );
    }

    #[test]
    fn predicates_see_through_context() {
        let err = Error::unknown_field("users", "nickname").context(err!("insert failed"));
        assert!(err.is_unknown_field());
        assert!(!err.is_type_mismatch());
        assert_eq!(
            err.to_string(),
            "insert failed: unknown field `nickname` on table `users`"
        );
    }

    #[test]
    fn batch_record_index() {
        let err = Error::type_mismatch("age", FieldType::Integer, "REAL value")
            .context(Error::batch_record(3));

        assert_eq!(err.record_index(), Some(3));
        assert!(err.is_type_mismatch());
        assert_eq!(
            err.to_string(),
            "record 3 of batch rejected: type mismatch on field `age`: expected INTEGER, found REAL value"
        );
    }

    #[test]
    fn record_index_absent_outside_batches() {
        let err = Error::not_open("insert");
        assert_eq!(err.record_index(), None);
        assert!(err.is_not_open());
    }

    #[test]
    fn table_state_errors() {
        assert_eq!(
            Error::table_exists("users").to_string(),
            "table `users` already exists"
        );
        assert_eq!(
            Error::table_not_found("users").to_string(),
            "table `users` does not exist"
        );
    }

    #[test]
    fn storage_engine_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk I/O error");
        let err = Error::storage_engine(io);
        assert!(err.is_storage_engine());
        assert_eq!(err.to_string(), "storage engine error: disk I/O error");
    }
}
