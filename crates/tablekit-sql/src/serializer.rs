#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod statement;
mod value;

use crate::stmt::Statement;

use tablekit_core::driver::{operation::Transaction, Dialect};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    /// Serializes `stmt`, pushing every bound value onto `params` in
    /// placeholder order.
    ///
    /// The same statement always serializes to the same text.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serialize a transaction control operation to a SQL string.
    ///
    /// MySQL starts transactions with `START TRANSACTION`, the other dialects
    /// with `BEGIN`.
    pub fn serialize_transaction(&self, op: &Transaction) -> String {
        match op {
            Transaction::Start => match self.flavor {
                Flavor::Mysql => "START TRANSACTION".to_string(),
                Flavor::Postgresql | Flavor::Sqlite => "BEGIN".to_string(),
            },
            Transaction::Commit => "COMMIT".to_string(),
            Transaction::Rollback => "ROLLBACK".to_string(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self.flavor {
            Flavor::Postgresql => Dialect::Postgresql,
            Flavor::Sqlite => Dialect::Sqlite,
            Flavor::Mysql => Dialect::Mysql,
        }
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }
}
