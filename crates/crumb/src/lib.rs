mod cursor;
pub use cursor::Cursor;

pub mod db;
pub use db::Db;

mod executor;
pub use executor::Executor;

mod model;
pub use model::{FromRow, Model};

mod query;
pub use query::SelectBuilder;

mod repository;
pub use repository::Repository;

mod transaction;
pub use transaction::Transaction;

pub use crumb_core::{driver, schema, stmt, Error, Result};

#[cfg(feature = "sqlite")]
pub use crumb_sqlite as sqlite;
