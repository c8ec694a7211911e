use super::{FieldType, Schema};
use crate::Error;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A schema declared as data, for example in a configuration file.
///
/// ```json
/// {
///     "table_name": "users",
///     "fields": { "id": "INTEGER", "name": "TEXT", "age": "INTEGER" },
///     "primary_key": ["id"],
///     "unique_keys": [["name"]]
/// }
/// ```
///
/// Field order in `fields` is kept. `primary_key` may be omitted, in which case
/// the usual default applies; `unique_keys` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDef {
    pub table_name: String,

    pub fields: IndexMap<String, FieldType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_keys: Vec<Vec<String>>,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = Error;

    fn try_from(def: SchemaDef) -> Result<Schema, Error> {
        let mut builder = def
            .fields
            .into_iter()
            .fold(Schema::builder(def.table_name), |builder, (name, ty)| {
                builder.field(name, ty)
            });

        if let Some(primary_key) = def.primary_key {
            builder = builder.primary_key(primary_key);
        }

        def.unique_keys
            .into_iter()
            .fold(builder, |builder, unique| builder.unique(unique))
            .build()
    }
}

impl From<&Schema> for SchemaDef {
    fn from(schema: &Schema) -> SchemaDef {
        SchemaDef {
            table_name: schema.table_name.clone(),
            fields: schema.fields.clone(),
            primary_key: Some(schema.primary_key.clone()),
            unique_keys: schema.unique_keys.clone(),
        }
    }
}
