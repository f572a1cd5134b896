use crate::{Cursor, FromRow, Result};
use crumb_core::{
    driver::{operation, Response},
    schema::Schema,
    stmt::{Select, Statement},
    Connection,
};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::MutexGuard;

/// An active database transaction.
///
/// Pins the shared connection for its lifetime, so no other operation can
/// interleave with the transaction. If dropped without [`commit`] or
/// [`rollback`], the transaction is rolled back before the connection is
/// next used.
///
/// [`commit`]: Self::commit
/// [`rollback`]: Self::rollback
pub struct Transaction<'db> {
    schema: Arc<Schema>,
    connection: MutexGuard<'db, Box<dyn Connection>>,
    abandoned: &'db AtomicBool,
    completed: bool,
}

impl<'db> Transaction<'db> {
    pub(crate) fn new(
        schema: Arc<Schema>,
        connection: MutexGuard<'db, Box<dyn Connection>>,
        abandoned: &'db AtomicBool,
    ) -> Self {
        Self {
            schema,
            connection,
            abandoned,
            completed: false,
        }
    }

    /// Execute a statement within the transaction
    pub async fn exec(&mut self, statement: Statement) -> Result<Response> {
        self.connection.exec(&self.schema, statement.into()).await
    }

    /// Execute a query within the transaction, returning all matching records
    pub async fn all<T: FromRow>(&mut self, query: Select) -> Result<Cursor<T>> {
        let rows = self.exec(query.into()).await?.into_rows()?;
        Ok(Cursor::new(rows))
    }

    /// Commit the transaction.
    pub async fn commit(mut self) -> Result<()> {
        self.control(operation::Transaction::Commit).await
    }

    /// Roll back the transaction.
    pub async fn rollback(mut self) -> Result<()> {
        self.control(operation::Transaction::Rollback).await
    }

    async fn control(&mut self, op: operation::Transaction) -> Result<()> {
        self.connection.exec(&self.schema, op.into()).await?;
        self.completed = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.abandoned.store(true, Ordering::Release);
        }
    }
}
