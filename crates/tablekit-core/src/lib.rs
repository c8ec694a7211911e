#[macro_use]
mod macros;

pub mod driver;
pub use driver::{Connection, Dialect, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{FieldType, Schema, TypeRegistry};

pub mod stmt;
pub use stmt::{Record, Value};

/// A Result type alias that uses Tablekit's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
