mod connect;
pub use connect::Connect;

mod diagnostics;

pub mod dump;
pub use dump::CsvExporter;

pub mod storage;
pub use storage::{Builder, Session, TableStorage};

mod transaction;
pub use transaction::Transaction;

pub use tablekit_core::{
    record, schema,
    stmt::{Record, Value},
    Dialect, Driver, Error, FieldType, Result, Schema, TypeRegistry,
};
pub use tablekit_sql::{Direction, Query};
