mod value;
pub(crate) use value::Value;

use rusqlite::{Connection as RusqliteConnection, OptionalExtension};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tablekit_core::{
    driver::{
        operation::{Operation, QuerySql, Transaction},
        Dialect, Driver, Response,
    },
    Error, Result,
};
use tablekit_sql::Serializer;
use url::Url;

/// SQLite storage engine, backed by a database file or by memory.
#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    ///
    /// `sqlite::memory:` selects an in-memory database, any other path a file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::connection_failed(format!("invalid connection URL `{url_str}`"), err)
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::connection(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn connect(&self) -> Result<Box<dyn tablekit_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    serializer: Serializer,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(|err| {
            Error::connection_failed("failed to open in-memory database", err)
        })?;

        tracing::debug!("opened in-memory sqlite database");
        Ok(Self::from_rusqlite(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = RusqliteConnection::open(path).map_err(|err| {
            Error::connection_failed(format!("failed to open `{}`", path.display()), err)
        })?;

        tracing::debug!(path = %path.display(), "opened sqlite database");
        Ok(Self::from_rusqlite(connection))
    }

    fn from_rusqlite(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            serializer: Serializer::sqlite(),
        }
    }

    fn query_sql(&mut self, op: QuerySql) -> Result<Response> {
        tracing::debug!(sql = %op.sql, params = op.params.len(), "executing statement");

        let mut stmt = self
            .connection
            .prepare_cached(&op.sql)
            .map_err(engine_error)?;

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let Some(ret_tys) = op.ret else {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(engine_error)?;

            let response = Response::count(count as _);

            return Ok(if op.last_insert_id {
                response.with_last_insert_id(self.connection.last_insert_rowid())
            } else {
                response
            });
        };

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(engine_error)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(ret_tys.len());

                    for (index, ty) in ret_tys.iter().enumerate() {
                        items.push(Value::from_sql(row, index, *ty)?.into_inner());
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => return Err(engine_error(err)),
            }
        }

        Ok(Response::values(ret))
    }

    fn transaction(&mut self, op: Transaction) -> Result<Response> {
        let sql = self.serializer.serialize_transaction(&op);
        tracing::debug!(%sql, "transaction control");

        self.connection.execute_batch(&sql).map_err(engine_error)?;
        Ok(Response::count(0))
    }
}

impl tablekit_core::Connection for Connection {
    fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query_sql(op),
            Operation::Transaction(op) => self.transaction(op),
        }
    }

    fn table_exists(&mut self, table: &str) -> Result<bool> {
        // Table names are case-insensitive in SQLite.
        self.connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                [table],
                |_| Ok(()),
            )
            .optional()
            .map(|row| row.is_some())
            .map_err(engine_error)
    }

    fn close(self: Box<Self>) -> Result<()> {
        let Connection { connection, .. } = *self;

        connection.close().map_err(|(_, err)| engine_error(err))?;
        tracing::debug!("closed sqlite database");
        Ok(())
    }
}

fn engine_error(err: rusqlite::Error) -> Error {
    tracing::error!(%err, "sqlite rejected the operation");
    Error::storage_engine(err)
}
