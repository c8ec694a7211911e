use super::Error;

/// Error when the storage location cannot be opened or accessed.
#[derive(Debug)]
pub(super) struct ConnectionError {
    message: Box<str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl core::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "connection error: {}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a connection error with a message.
    pub fn connection(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Connection(ConnectionError {
            message: message.into().into(),
            source: None,
        }))
    }

    /// Creates a connection error caused by a lower-level failure, such as the
    /// driver refusing to open a database file.
    pub fn connection_failed(
        message: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::Connection(ConnectionError {
            message: message.into().into(),
            source: Some(Box::new(err)),
        }))
    }

    /// Returns `true` if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Connection(_))
    }
}
