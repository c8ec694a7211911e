pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::{Direction, OrderBy, Query, Statement};
