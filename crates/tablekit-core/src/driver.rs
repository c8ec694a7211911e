mod dialect;
pub use dialect::Dialect;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{schema::TypeRegistry, Result};

use std::{borrow::Cow, fmt::Debug};

/// A storage engine that tables can be bound to.
///
/// The driver itself is only a description of where the engine lives; the
/// work happens on the [`Connection`] it opens.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Location of the storage, as a URL.
    fn url(&self) -> Cow<'_, str>;

    /// SQL dialect the engine speaks.
    fn dialect(&self) -> Dialect;

    /// Column type tokens the engine understands.
    fn type_registry(&self) -> TypeRegistry {
        TypeRegistry::for_dialect(self.dialect())
    }

    /// Opens a connection to the storage location.
    ///
    /// Fails with a connection error when the location is inaccessible.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// An open handle to a storage engine.
///
/// Connections are used from one thread at a time and run every operation to
/// completion before returning.
pub trait Connection: Debug + Send {
    /// Execute a database operation
    fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Returns `true` if a table named `table` exists.
    fn table_exists(&mut self, table: &str) -> Result<bool>;

    /// Closes the handle, reporting any failure to release it.
    fn close(self: Box<Self>) -> Result<()>;
}
