pub mod operation;
pub use operation::Operation;

mod response;
pub use response::Response;

use crate::{async_trait, schema::Schema};

use std::{borrow::Cow, fmt::Debug, sync::Arc};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL the driver targets.
    fn url(&self) -> Cow<'_, str>;

    /// Establish a connection to the storage engine.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Send {
    /// Execute a database operation
    async fn exec(&mut self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response>;

    /// Creates tables and indices defined in the schema on the database.
    async fn push_schema(&mut self, schema: &Schema) -> crate::Result<()>;
}
