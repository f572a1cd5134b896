use crate::{Db, Result, Transaction};
use crumb_core::{async_trait, driver::Response, stmt::Statement};

/// Anything statements can be executed against: a [`Db`] handle directly, or
/// an open [`Transaction`].
#[async_trait]
pub trait Executor: Send {
    async fn exec(&mut self, statement: Statement) -> Result<Response>;
}

#[async_trait]
impl Executor for Db {
    async fn exec(&mut self, statement: Statement) -> Result<Response> {
        Db::exec(self, statement).await
    }
}

#[async_trait]
impl Executor for Transaction<'_> {
    async fn exec(&mut self, statement: Statement) -> Result<Response> {
        Transaction::exec(self, statement).await
    }
}
