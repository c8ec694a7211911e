use super::Error;

use std::path::PathBuf;

/// Error when a dump destination cannot be written.
#[derive(Debug)]
pub(super) struct ExportError {
    path: PathBuf,
    inner: std::io::Error,
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for ExportError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to export to {}: {}",
            self.path.display(),
            self.inner
        )
    }
}

impl Error {
    /// Creates an export error for the destination `path`.
    pub fn export(path: impl Into<PathBuf>, err: std::io::Error) -> Error {
        Error::from(super::ErrorKind::Export(ExportError {
            path: path.into(),
            inner: err,
        }))
    }

    /// Returns `true` if this error is an export error.
    pub fn is_export(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Export(_))
    }
}
