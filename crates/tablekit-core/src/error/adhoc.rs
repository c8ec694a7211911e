use super::Error;

/// An error built from a formatted message, used for internal invariants that
/// have no dedicated kind.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an ad-hoc error from format arguments.
    ///
    /// Prefer the [`err!`](crate::err) and [`bail!`](crate::bail) macros.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        let message = match args.as_str() {
            Some(s) => s.into(),
            None => args.to_string().into_boxed_str(),
        };
        Error::from(super::ErrorKind::Adhoc(AdhocError { message }))
    }
}
