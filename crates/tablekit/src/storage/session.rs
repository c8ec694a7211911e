use super::TableStorage;
use crate::diagnostics;

use tablekit_core::Result;

use std::ops::{Deref, DerefMut};

/// An open [`TableStorage`] that is closed when the guard goes out of scope,
/// on every exit path.
///
/// Use [`close`](Self::close) to observe an error closing the storage;
/// dropping the guard logs it instead.
#[derive(Debug)]
pub struct Session<'a> {
    storage: &'a mut TableStorage,
}

impl<'a> Session<'a> {
    pub(super) fn new(storage: &'a mut TableStorage) -> Result<Session<'a>> {
        storage.open()?;
        Ok(Session { storage })
    }

    /// Closes the storage, reporting any failure to do so.
    pub fn close(self) -> Result<()> {
        self.storage.close()
    }
}

impl Deref for Session<'_> {
    type Target = TableStorage;

    fn deref(&self) -> &TableStorage {
        self.storage
    }
}

impl DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut TableStorage {
        self.storage
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.storage.close() {
            diagnostics::in_scope(self.storage.dispatch.as_ref(), || {
                tracing::error!(%err, "failed to close storage");
            });
        }
    }
}
