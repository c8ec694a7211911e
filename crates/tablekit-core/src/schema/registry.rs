use super::{FieldType, NativeKind, Schema};
use crate::{driver::Dialect, Error, Result};

use indexmap::IndexMap;
use std::borrow::Cow;

/// Maps field types to the column type tokens of one storage engine.
///
/// Each driver reports the registry for its engine; a schema can only be bound
/// to a driver whose registry knows every field type the schema uses. The
/// built-in registries cover all of [`FieldType::ALL`]; a custom registry
/// starts from [`TypeRegistry::empty`] and registers what the engine supports.
///
/// ```text
/// FieldType   sqlite    postgresql         mysql
/// INTEGER     INTEGER   BIGINT             BIGINT
/// REAL        REAL      DOUBLE PRECISION   DOUBLE
/// TEXT        TEXT      TEXT               TEXT
/// BLOB        BLOB      BYTEA              BLOB
/// DATE        DATE      DATE               DATE
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRegistry {
    dialect: Dialect,
    tokens: IndexMap<FieldType, Cow<'static, str>>,
}

impl TypeRegistry {
    /// The built-in registry for `dialect`.
    pub fn for_dialect(dialect: Dialect) -> TypeRegistry {
        let tokens: [&'static str; 5] = match dialect {
            Dialect::Sqlite => ["INTEGER", "REAL", "TEXT", "BLOB", "DATE"],
            Dialect::Postgresql => ["BIGINT", "DOUBLE PRECISION", "TEXT", "BYTEA", "DATE"],
            Dialect::Mysql => ["BIGINT", "DOUBLE", "TEXT", "BLOB", "DATE"],
        };

        FieldType::ALL
            .into_iter()
            .zip(tokens)
            .fold(TypeRegistry::empty(dialect), |registry, (ty, token)| {
                registry.register(ty, token)
            })
    }

    pub fn sqlite() -> TypeRegistry {
        TypeRegistry::for_dialect(Dialect::Sqlite)
    }

    pub fn postgresql() -> TypeRegistry {
        TypeRegistry::for_dialect(Dialect::Postgresql)
    }

    pub fn mysql() -> TypeRegistry {
        TypeRegistry::for_dialect(Dialect::Mysql)
    }

    /// A registry with no types registered.
    pub fn empty(dialect: Dialect) -> TypeRegistry {
        TypeRegistry {
            dialect,
            tokens: IndexMap::new(),
        }
    }

    /// Registers (or replaces) the column token for `ty`.
    pub fn register(mut self, ty: FieldType, token: impl Into<Cow<'static, str>>) -> TypeRegistry {
        self.tokens.insert(ty, token.into());
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn is_registered(&self, ty: FieldType) -> bool {
        self.tokens.contains_key(&ty)
    }

    /// Resolves `ty` to its native kind and column type token.
    pub fn resolve(&self, ty: FieldType) -> Result<(NativeKind, &str)> {
        match self.tokens.get(&ty) {
            Some(token) => Ok((ty.native_kind(), &**token)),
            None => Err(Error::unsupported_type(format!(
                "{ty} is not registered for {}",
                self.dialect
            ))),
        }
    }

    /// The column type token for `ty`.
    pub fn column_type(&self, ty: FieldType) -> Result<&str> {
        self.resolve(ty).map(|(_, token)| token)
    }

    /// Checks that every field of `schema` has a registered type.
    pub fn verify(&self, schema: &Schema) -> Result<()> {
        for (name, ty) in schema.fields() {
            self.resolve(ty).map_err(|err| {
                err.context(crate::err!(
                    "field `{name}` of table `{}`",
                    schema.table_name()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for TypeRegistry {
    fn default() -> TypeRegistry {
        TypeRegistry::sqlite()
    }
}
