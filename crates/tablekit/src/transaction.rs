use crate::diagnostics;

use tablekit_core::{
    driver::{
        operation::{self, QuerySql},
        Connection,
    },
    stmt::Record,
    Result, Schema,
};
use tablekit_sql::{Serializer, Statement};
use tracing::Dispatch;

/// An active unit of work on an open [`TableStorage`](crate::TableStorage).
///
/// Borrows the storage for its lifetime, so nothing else can run on the
/// connection while the transaction is open.
///
/// If dropped without calling [`commit`](Self::commit) or
/// [`rollback`](Self::rollback), the transaction is automatically rolled back.
pub struct Transaction<'a> {
    connection: &'a mut dyn Connection,
    schema: &'a Schema,
    serializer: &'a Serializer,
    dispatch: Option<&'a Dispatch>,

    /// Whether commit or rollback has been called.
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(
        connection: &'a mut dyn Connection,
        schema: &'a Schema,
        serializer: &'a Serializer,
        dispatch: Option<&'a Dispatch>,
    ) -> Result<Transaction<'a>> {
        diagnostics::in_scope(dispatch, || {
            connection.exec(operation::Transaction::Start.into())
        })?;

        Ok(Transaction {
            connection,
            schema,
            serializer,
            dispatch,
            finished: false,
        })
    }

    /// Inserts one record as part of the transaction, returning the row
    /// identity the engine assigned to it.
    pub fn insert(&mut self, record: &Record) -> Result<Option<i64>> {
        let stmt = Statement::insert(self.schema, record)?;
        self.exec_insert(&stmt)
    }

    pub(crate) fn exec_insert(&mut self, stmt: &Statement) -> Result<Option<i64>> {
        let mut params = vec![];
        let sql = self.serializer.serialize(stmt, &mut params);

        let Transaction {
            connection,
            dispatch,
            ..
        } = self;

        let response = diagnostics::in_scope(*dispatch, || {
            connection.exec(QuerySql::insert(sql, params).into())
        })?;

        Ok(response.last_insert_id)
    }

    /// Commit the transaction.
    pub fn commit(mut self) -> Result<()> {
        self.finish(operation::Transaction::Commit)?;
        diagnostics::in_scope(self.dispatch, || {
            tracing::info!(table = self.schema.table_name(), "committed transaction");
        });
        Ok(())
    }

    /// Roll back the transaction.
    pub fn rollback(mut self) -> Result<()> {
        self.finish(operation::Transaction::Rollback)
    }

    fn finish(&mut self, op: operation::Transaction) -> Result<()> {
        let Transaction {
            connection,
            dispatch,
            ..
        } = self;

        diagnostics::in_scope(*dispatch, || connection.exec(op.into()))?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(err) = self.finish(operation::Transaction::Rollback) {
                diagnostics::in_scope(self.dispatch, || {
                    tracing::error!(%err, "failed to roll back abandoned transaction");
                });
            }
        }
    }
}
