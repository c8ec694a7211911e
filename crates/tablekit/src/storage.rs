mod builder;
pub use builder::Builder;

mod session;
pub use session::Session;

use crate::{CsvExporter, Transaction};

use tablekit_core::{
    driver::{operation::QuerySql, Connection, Driver},
    stmt::{Record, Value},
    Error, FieldType, Result, Schema, TypeRegistry,
};
use tablekit_sql::{Query, Serializer, Statement};
use tracing::Dispatch;

use std::path::Path;

/// One table in a storage engine, described by a [`Schema`].
///
/// A storage starts idle. [`open`](Self::open) connects it to the engine and
/// [`close`](Self::close) releases the connection for good: a closed storage
/// cannot be opened again. Every data operation requires the storage to be
/// open and fails with a not-open error otherwise.
///
/// ```
/// use tablekit::{record, FieldType, Query, Schema, TableStorage};
///
/// let schema = Schema::builder("users")
///     .field("id", FieldType::Integer)
///     .field("name", FieldType::Text)
///     .primary_key(["id"])
///     .build()?;
///
/// let mut storage = TableStorage::builder(schema)
///     .url("sqlite::memory:")
///     .build()?;
///
/// let users = storage.with_session(|storage| {
///     storage.create_table(false)?;
///     storage.insert(&record! { "id" => 1, "name" => "John" })?;
///     storage.query(&Query::new())
/// })?;
///
/// assert_eq!(users, [record! { "id" => 1, "name" => "John" }]);
/// # Ok::<(), tablekit::Error>(())
/// ```
#[derive(Debug)]
pub struct TableStorage {
    schema: Schema,
    driver: Box<dyn Driver>,
    registry: TypeRegistry,
    serializer: Serializer,
    state: State,

    /// Receives the storage's events instead of the global subscriber
    dispatch: Option<Dispatch>,
}

#[derive(Debug)]
enum State {
    Idle,
    Open(Box<dyn Connection>),
    Closed,
}

impl State {
    fn connection(&mut self, operation: &'static str) -> Result<&mut dyn Connection> {
        match self {
            State::Open(connection) => Ok(connection.as_mut()),
            State::Idle | State::Closed => Err(Error::not_open(operation)),
        }
    }
}

impl TableStorage {
    pub fn builder(schema: Schema) -> Builder {
        Builder::new(schema)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The storage engine the table lives in.
    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Connects to the storage engine. Opening an open storage does nothing.
    ///
    /// Fails with a connection error when the storage location is
    /// inaccessible, or when the storage was closed before.
    pub fn open(&mut self) -> Result<()> {
        self.scoped(|this| match this.state {
            State::Open(_) => Ok(()),
            State::Closed => Err(Error::connection(
                "storage was closed and cannot be reopened",
            )),
            State::Idle => {
                let connection = this.driver.connect()?;
                this.state = State::Open(connection);
                tracing::info!(url = %this.driver.url(), "connected");
                Ok(())
            }
        })
    }

    /// Releases the connection. The storage cannot be opened again.
    pub fn close(&mut self) -> Result<()> {
        self.scoped(|this| {
            match std::mem::replace(&mut this.state, State::Closed) {
                State::Open(connection) => {
                    connection.close()?;
                    tracing::info!(url = %this.driver.url(), "closed");
                }
                State::Idle | State::Closed => {}
            }
            Ok(())
        })
    }

    /// Opens the storage and returns a guard that closes it when dropped.
    pub fn session(&mut self) -> Result<Session<'_>> {
        Session::new(self)
    }

    /// Runs `f` on the open storage, closing it afterwards whether or not `f`
    /// succeeded.
    ///
    /// An error from `f` takes precedence over an error closing the storage.
    pub fn with_session<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.open()?;
        let ret = f(self);
        let closed = self.close();
        let value = ret?;
        closed?;
        Ok(value)
    }

    /// The statement creating the table, as text.
    pub fn ddl(&self) -> Result<String> {
        let stmt = Statement::create_table(&self.schema, &self.registry)?;
        let mut params: Vec<Value> = vec![];
        Ok(self.serializer.serialize(&stmt, &mut params))
    }

    /// Creates the table.
    ///
    /// If the table already exists, fails with a table-exists error unless
    /// `allow_exist` is set, in which case nothing happens.
    pub fn create_table(&mut self, allow_exist: bool) -> Result<()> {
        self.scoped(|this| {
            let connection = this.state.connection("create")?;
            let table = this.schema.table_name();

            if connection.table_exists(table)? {
                if allow_exist {
                    tracing::info!(table, "table already exists");
                    return Ok(());
                }
                return Err(Error::table_exists(table));
            }

            let stmt = Statement::create_table(&this.schema, &this.registry)?;
            let mut params = vec![];
            let sql = this.serializer.serialize(&stmt, &mut params);

            connection.exec(QuerySql::execute(sql, params).into())?;
            tracing::info!(table, "created table");
            Ok(())
        })
    }

    /// Drops the table.
    ///
    /// If the table does not exist, fails with a table-not-found error unless
    /// `allow_not_exist` is set, in which case nothing happens.
    pub fn drop_table(&mut self, allow_not_exist: bool) -> Result<()> {
        self.scoped(|this| {
            let connection = this.state.connection("drop")?;
            let table = this.schema.table_name();

            if !connection.table_exists(table)? {
                if allow_not_exist {
                    tracing::info!(table, "table does not exist");
                    return Ok(());
                }
                return Err(Error::table_not_found(table));
            }

            let mut params = vec![];
            let sql = this
                .serializer
                .serialize(&Statement::drop_table(&this.schema), &mut params);

            connection.exec(QuerySql::execute(sql, params).into())?;
            tracing::info!(table, "dropped table");
            Ok(())
        })
    }

    /// Inserts one record, returning the row identity the engine assigned to
    /// it, if it reports one.
    pub fn insert(&mut self, record: &Record) -> Result<Option<i64>> {
        self.scoped(|this| {
            let connection = this.state.connection("insert")?;
            let stmt = Statement::insert(&this.schema, record)?;

            let mut params = vec![];
            let sql = this.serializer.serialize(&stmt, &mut params);

            let response = connection.exec(QuerySql::insert(sql, params).into())?;
            tracing::info!(table = this.schema.table_name(), "inserted record");
            Ok(response.last_insert_id)
        })
    }

    /// Inserts every record, or none of them.
    ///
    /// All records are validated before anything is sent to the engine. A
    /// validation error names the offending record through
    /// [`Error::record_index`]. The inserts then run in one transaction, which
    /// is rolled back if any of them fails.
    ///
    /// Returns the number of rows inserted.
    pub fn insert_many(&mut self, records: &[Record]) -> Result<u64> {
        self.scoped(|this| {
            let connection = this.state.connection("insert_many")?;
            let stmts = Statement::insert_many(&this.schema, records)?;

            if stmts.is_empty() {
                return Ok(0);
            }

            let mut transaction = Transaction::begin(
                connection,
                &this.schema,
                &this.serializer,
                this.dispatch.as_ref(),
            )?;

            for stmt in &stmts {
                transaction.exec_insert(stmt)?;
            }

            transaction.commit()?;
            tracing::info!(
                table = this.schema.table_name(),
                rows = stmts.len(),
                "inserted batch"
            );
            Ok(stmts.len() as u64)
        })
    }

    /// Starts a transaction. It has to be committed for its inserts to stay.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        let connection = self.state.connection("transaction")?;
        Transaction::begin(
            connection,
            &self.schema,
            &self.serializer,
            self.dispatch.as_ref(),
        )
    }

    /// Returns the rows matching `query`, with every declared field set.
    pub fn query(&mut self, query: &Query) -> Result<Vec<Record>> {
        self.scoped(|this| this.query_records("query", query))
    }

    /// Runs `query` and writes the result as CSV to `path`, with the declared
    /// column order as header.
    ///
    /// Returns the number of rows written.
    pub fn query_dump(&mut self, query: &Query, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();

        self.scoped(|this| {
            let records = this.query_records("query_dump", query)?;
            let columns = this.schema.column_names();

            let written = CsvExporter::new().export(&records, &columns, path)?;
            tracing::info!(path = %path.display(), rows = written, "dumped query result");
            Ok(written)
        })
    }

    /// Deletes every row, returning how many were removed.
    pub fn empty(&mut self) -> Result<u64> {
        self.scoped(|this| {
            let connection = this.state.connection("empty")?;

            let mut params = vec![];
            let sql = this
                .serializer
                .serialize(&Statement::delete_all(&this.schema), &mut params);

            let removed = connection
                .exec(QuerySql::execute(sql, params).into())?
                .rows
                .into_count()?;

            tracing::info!(table = this.schema.table_name(), rows = removed, "emptied table");
            Ok(removed)
        })
    }

    /// Number of rows in the table.
    pub fn count(&mut self) -> Result<u64> {
        self.scoped(|this| {
            let connection = this.state.connection("count")?;

            let mut params = vec![];
            let sql = this
                .serializer
                .serialize(&Statement::count(&this.schema), &mut params);

            let query = QuerySql::query(sql, params, vec![FieldType::Integer]);
            let rows = connection.exec(query.into())?.rows.into_values()?;

            match rows.first().and_then(|row| row.first()).and_then(Value::as_i64) {
                Some(count) => Ok(count as u64),
                None => tablekit_core::bail!("row count missing from the engine's response"),
            }
        })
    }

    fn query_records(&mut self, operation: &'static str, query: &Query) -> Result<Vec<Record>> {
        let connection = self.state.connection(operation)?;
        let stmt = Statement::select(&self.schema, query)?;

        let mut params = vec![];
        let sql = self.serializer.serialize(&stmt, &mut params);
        let ret = self.schema.fields().map(|(_, ty)| ty).collect();

        let rows = connection
            .exec(QuerySql::query(sql, params, ret).into())?
            .rows
            .into_values()?;

        let columns = self.schema.column_names();

        Ok(rows
            .into_iter()
            .map(|row| columns.iter().copied().zip(row).collect())
            .collect())
    }

    /// Runs `f` under the storage's own dispatcher, if it has one.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        match self.dispatch.clone() {
            Some(dispatch) => tracing::dispatcher::with_default(&dispatch, || f(self)),
            None => f(self),
        }
    }
}
