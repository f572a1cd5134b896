mod builder;
pub use builder::Builder;

use crate::{Cursor, FromRow, Result, Transaction};
use crumb_core::{
    driver::{operation, Driver, Response},
    schema::Schema,
    stmt::{Select, Statement},
    Connection,
};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::{Mutex, MutexGuard};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Box<dyn Driver>,
    pub(crate) connection: Mutex<Box<dyn Connection>>,

    /// Set when a transaction was dropped without commit or rollback. The
    /// next operation to take the connection rolls the transaction back
    /// before proceeding.
    pub(crate) abandoned_tx: AtomicBool,
}

/// A database handle.
///
/// Owns one driver connection behind an async mutex; every operation is a
/// single round trip. Cloning is cheap and shares the connection.
#[derive(Clone)]
pub struct Db {
    pub(crate) shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    /// Execute a statement
    pub async fn exec(&self, statement: Statement) -> Result<Response> {
        let mut connection = self.connection().await?;
        connection
            .exec(&self.shared.schema, statement.into())
            .await
    }

    /// Execute a query, returning all matching records
    pub async fn all<T: FromRow>(&self, query: Select) -> Result<Cursor<T>> {
        let rows = self.exec(query.into()).await?.into_rows()?;
        Ok(Cursor::new(rows))
    }

    /// Execute a query, returning the first matching record
    pub async fn first<T: FromRow>(&self, mut query: Select) -> Result<Option<T>> {
        query.limit = Some(1);
        let mut cursor = self.all(query).await?;
        cursor.next().await.transpose()
    }

    /// Start a transaction, pinning the connection until commit or rollback.
    pub async fn begin(&self) -> Result<Transaction<'_>> {
        let mut connection = self.connection().await?;
        connection
            .exec(&self.shared.schema, operation::Transaction::Start.into())
            .await?;

        Ok(Transaction::new(
            self.shared.schema.clone(),
            connection,
            &self.shared.abandoned_tx,
        ))
    }

    /// Creates tables and indices defined in the schema on the database.
    pub async fn push_schema(&self) -> Result<()> {
        let mut connection = self.connection().await?;
        connection.push_schema(&self.shared.schema).await
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub(crate) async fn connection(&self) -> Result<MutexGuard<'_, Box<dyn Connection>>> {
        let mut guard = self.shared.connection.lock().await;

        if self.shared.abandoned_tx.swap(false, Ordering::AcqRel) {
            guard
                .exec(
                    &self.shared.schema,
                    operation::Transaction::Rollback.into(),
                )
                .await?;
        }

        Ok(guard)
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("url", &self.shared.driver.url())
            .finish()
    }
}
