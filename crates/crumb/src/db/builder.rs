use super::{Db, Shared};
use crate::{Model, Result};
use crumb_core::{driver::Driver, schema};

use std::sync::{atomic::AtomicBool, Arc};
use tokio::sync::Mutex;

/// Registers models and connects, producing a [`Db`].
#[derive(Default)]
pub struct Builder {
    schema: schema::Builder,
}

impl Builder {
    /// Register a model's table with the schema.
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.schema.register(M::table_def());
        self
    }

    /// Verify the registered schema and connect using the given driver.
    pub async fn connect(self, driver: impl Driver) -> Result<Db> {
        let schema = Arc::new(self.schema.build()?);
        let connection = driver.connect().await?;

        Ok(Db {
            shared: Arc::new(Shared {
                schema,
                driver: Box::new(driver),
                connection: Mutex::new(connection),
                abandoned_tx: AtomicBool::new(false),
            }),
        })
    }
}
