mod builder;
pub use builder::Builder;

mod def;
pub use def::SchemaDef;

mod keyword;

mod field_type;
pub use field_type::{FieldType, NativeKind};

mod registry;
pub use registry::TypeRegistry;

use crate::Result;

use indexmap::IndexMap;

/// Primary key used when a schema does not declare one.
pub const DEFAULT_PRIMARY_KEY: &str = "_id";

/// Describes one logical table: its name, its fields in column order, its
/// primary key and its unique key groups.
///
/// A `Schema` is always valid. It is only produced by [`Builder::build`] or
/// [`Schema::from_def`], which check that:
///
/// * the table name and every field name are plain identifiers and not SQL
///   keywords;
/// * at least one field is declared;
/// * every name in the primary key and in each unique group is a declared field.
///
/// The declaration order of fields is kept and determines the column order of
/// every generated statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) table_name: String,
    pub(crate) fields: IndexMap<String, FieldType>,
    pub(crate) primary_key: Vec<String>,
    pub(crate) unique_keys: Vec<Vec<String>>,
}

impl Schema {
    /// Starts declaring a schema for `table_name`.
    pub fn builder(table_name: impl Into<String>) -> Builder {
        Builder::new(table_name)
    }

    /// Validates a schema declared as data.
    pub fn from_def(def: SchemaDef) -> Result<Schema> {
        def.try_into()
    }

    /// Parses and validates a schema declared as JSON, see [`SchemaDef`].
    pub fn from_json(src: &str) -> Result<Schema> {
        let def: SchemaDef = serde_json::from_str(src)?;
        Schema::from_def(def)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fields with their types, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> + '_ {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Field names in declaration order; this is the column order.
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    pub fn is_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Position of the field in column order.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn unique_keys(&self) -> &[Vec<String>] {
        &self.unique_keys
    }

    /// Returns `true` if `name` is part of the primary key.
    pub fn is_primary(&self, name: &str) -> bool {
        self.primary_key.iter().any(|key| key == name)
    }

    /// Returns `true` if `group` names exactly the fields of one declared
    /// unique key, in any order.
    pub fn is_unique_group<S: AsRef<str>>(&self, group: &[S]) -> bool {
        self.unique_keys.iter().any(|unique| {
            unique.len() == group.len()
                && group
                    .iter()
                    .all(|name| unique.iter().any(|field| field == name.as_ref()))
        })
    }

    /// Returns `true` if the primary key is the single `INTEGER` field, which
    /// most engines fill in with a generated row identity when omitted.
    pub fn has_row_identity(&self) -> bool {
        match &self.primary_key[..] {
            [key] => self.field_type(key) == Some(FieldType::Integer),
            _ => false,
        }
    }
}

/// Returns `true` if `name` can be used unquoted as a table or column name.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
