use super::Error;

/// Context attached to a validation failure inside a batch, naming the
/// offending record.
#[derive(Debug)]
pub(super) struct BatchRecordError {
    index: usize,
}

impl std::error::Error for BatchRecordError {}

impl core::fmt::Display for BatchRecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record {} of batch rejected", self.index)
    }
}

impl Error {
    /// Creates the context error for the zero-based record `index` of a batch.
    ///
    /// Meant to be chained with [`Error::context`] onto the validation failure.
    pub fn batch_record(index: usize) -> Error {
        Error::from(super::ErrorKind::BatchRecord(BatchRecordError { index }))
    }

    /// Returns the zero-based index of the batch record that caused this error,
    /// if the error came out of a batch.
    pub fn record_index(&self) -> Option<usize> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::BatchRecord(batch) => Some(batch.index),
            _ => None,
        })
    }
}
