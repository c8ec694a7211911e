mod column_def;
pub use column_def::ColumnDef;

mod condition;
pub use condition::Condition;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod insert;
pub use insert::Insert;

mod query;
pub use query::{Direction, OrderBy, Query};

mod select;
pub use select::{Returning, Select};

pub use tablekit_core::stmt::{Record, Value};

use tablekit_core::{schema::Schema, Error, Result};

/// A statement ready to be serialized for a dialect.
///
/// Statements are only built through the constructors on this type, which
/// check every field name and value against the table's schema. Anything that
/// reaches the serializer is therefore valid for that schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    DropTable(DropTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
}

/// Checks that `name` is a field of `schema` and that `value` can be stored in
/// it, returning the value converted to the field's type.
pub(crate) fn typed_value(schema: &Schema, name: &str, value: Value) -> Result<Value> {
    let Some(ty) = schema.field_type(name) else {
        return Err(Error::unknown_field(schema.table_name(), name));
    };

    let found = value.describe();
    value
        .coerce(ty)
        .ok_or_else(|| Error::type_mismatch(name, ty, found))
}

/// Checks that `name` is a field of `schema`.
pub(crate) fn known_field(schema: &Schema, name: &str) -> Result<()> {
    if schema.is_field(name) {
        Ok(())
    } else {
        Err(Error::unknown_field(schema.table_name(), name))
    }
}
