use super::{is_identifier, keyword::is_keyword, FieldType, Schema, DEFAULT_PRIMARY_KEY};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Declares a [`Schema`] field by field.
///
/// ```
/// use tablekit_core::{FieldType, Schema};
///
/// let schema = Schema::builder("users")
///     .field("id", FieldType::Integer)
///     .field("name", FieldType::Text)
///     .primary_key(["id"])
///     .unique(["name"])
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.column_names(), ["id", "name"]);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    table_name: String,
    fields: Vec<(String, FieldType)>,
    primary_key: Option<Vec<String>>,
    unique_keys: Vec<Vec<String>>,
}

impl Builder {
    pub(super) fn new(table_name: impl Into<String>) -> Builder {
        Builder {
            table_name: table_name.into(),
            fields: vec![],
            primary_key: None,
            unique_keys: vec![],
        }
    }

    /// Declares a field. Fields become columns in the order they are declared.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    /// Sets the primary key. When never called, the key defaults to
    /// [`DEFAULT_PRIMARY_KEY`], which then has to be a declared field. An empty
    /// key declares a table without a primary key.
    pub fn primary_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a unique key group. May be called several times.
    pub fn unique<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_keys
            .push(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the declaration and produces the schema.
    pub fn build(self) -> Result<Schema> {
        let Builder {
            table_name,
            fields: declared,
            primary_key,
            unique_keys: declared_unique,
        } = self;

        if table_name.is_empty() {
            return Err(Error::schema("table name must not be empty"));
        }

        if !is_identifier(&table_name) {
            return Err(Error::schema(format!(
                "table name `{table_name}` is not a valid identifier"
            )));
        }

        if is_keyword(&table_name) {
            return Err(Error::schema(format!(
                "table name `{table_name}` is a reserved SQL keyword"
            )));
        }

        if declared.is_empty() {
            return Err(Error::schema(format!(
                "table `{table_name}` must declare at least one field"
            )));
        }

        let mut fields = IndexMap::with_capacity(declared.len());

        for (name, ty) in declared {
            if !is_identifier(&name) {
                return Err(Error::schema(format!(
                    "field name `{name}` is not a valid identifier"
                )));
            }

            if is_keyword(&name) {
                return Err(Error::schema(format!(
                    "field name `{name}` is a reserved SQL keyword"
                )));
            }

            if fields.contains_key(&name) {
                return Err(Error::schema(format!("field `{name}` is declared twice")));
            }

            fields.insert(name, ty);
        }

        let primary_key = match primary_key {
            Some(primary_key) => {
                check_key_fields(&fields, &primary_key, "primary key")?;
                primary_key
            }
            None => {
                if !fields.contains_key(DEFAULT_PRIMARY_KEY) {
                    return Err(Error::schema(format!(
                        "no primary key declared and the default key field `{DEFAULT_PRIMARY_KEY}` is not a declared field"
                    )));
                }
                vec![DEFAULT_PRIMARY_KEY.to_string()]
            }
        };

        let mut unique_keys: Vec<Vec<String>> = Vec::with_capacity(declared_unique.len());

        for unique in declared_unique {
            if unique.is_empty() {
                return Err(Error::schema("unique key must name at least one field"));
            }

            check_key_fields(&fields, &unique, "unique key")?;

            if !unique_keys.contains(&unique) {
                unique_keys.push(unique);
            }
        }

        Ok(Schema {
            table_name,
            fields,
            primary_key,
            unique_keys,
        })
    }
}

fn check_key_fields(
    fields: &IndexMap<String, FieldType>,
    key: &[String],
    what: &str,
) -> Result<()> {
    for (index, name) in key.iter().enumerate() {
        if !fields.contains_key(name) {
            return Err(Error::schema(format!(
                "{what} field `{name}` is not a declared field"
            )));
        }

        if key[..index].contains(name) {
            return Err(Error::schema(format!(
                "{what} names field `{name}` more than once"
            )));
        }
    }

    Ok(())
}
