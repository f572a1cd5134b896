mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use crumb_core::{
    async_trait,
    driver::{
        operation::{Operation, Transaction},
        Driver, Response,
    },
    schema::{Schema, Table},
    stmt, Error, Result,
};
use crumb_sql as sql;
use url::Url;

/// Opening the database is retried a bounded number of times before the
/// connectivity error surfaces to the caller.
const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::connectivity(format!("invalid connection URL: {err}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::connectivity(format!(
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

    fn try_connect(&self) -> Result<Connection> {
        let connection = match self {
            Self::File(path) => RusqliteConnection::open(path)
                .map_err(|err| Error::connectivity(err.to_string()))?,
            Self::InMemory => RusqliteConnection::open_in_memory()
                .map_err(|err| Error::connectivity(err.to_string()))?,
        };

        // Referential actions are ignored unless the pragma is set per
        // connection.
        connection
            .pragma_update(None, "foreign_keys", true)
            .map_err(map_err)?;

        Ok(Connection { connection })
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Self::InMemory => Cow::Borrowed("sqlite::memory:"),
            Self::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn crumb_core::Connection>> {
        let mut last_err = None;

        for attempt in 0..CONNECT_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }

            match self.try_connect() {
                Ok(connection) => return Ok(Box::new(connection)),
                Err(err) if err.is_connectivity() => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_err.expect("at least one connect attempt"))
    }
}

pub struct Connection {
    connection: RusqliteConnection,
}

#[async_trait]
impl crumb_core::Connection for Connection {
    async fn exec(&mut self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        let stmt = match op {
            Operation::Transaction(txn) => {
                let sql = sql::Serializer::sqlite(schema).serialize_transaction(txn);
                self.connection.execute(sql, []).map_err(map_err)?;
                return Ok(Response::count(0));
            }
            Operation::Exec(stmt) => stmt,
        };

        let width = stmt.returning_len();

        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite(schema).serialize(&stmt, &mut params);

        let mut prepared = self.connection.prepare_cached(&sql_str).map_err(map_err)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let Some(width) = width else {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(map_err)?;

            return Ok(Response::count(count as u64));
        };

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(map_err)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut fields = Vec::with_capacity(width);

                    for index in 0..width {
                        fields.push(Value::from_sql(row, index)?.into_inner());
                    }

                    ret.push(stmt::ValueRecord::from_vec(fields));
                }
                Ok(None) => break,
                Err(err) => return Err(map_err(err)),
            }
        }

        Ok(Response::rows(ret))
    }

    async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        for table in &schema.tables {
            self.create_table(schema, table)?;
        }

        Ok(())
    }
}

impl Connection {
    fn create_table(&mut self, schema: &Schema, table: &Table) -> Result<()> {
        let serializer = sql::Serializer::sqlite(schema);

        self.connection
            .execute(&serializer.create_table(table), [])
            .map_err(map_err)?;

        for index in &table.indices {
            self.connection
                .execute(&serializer.create_index(index), [])
                .map_err(map_err)?;
        }

        Ok(())
    }
}

/// Classifies engine errors into the crumb error taxonomy.
fn map_err(err: rusqlite::Error) -> Error {
    use rusqlite::ErrorCode;

    if let rusqlite::Error::SqliteFailure(e, msg) = &err {
        match e.code {
            ErrorCode::ConstraintViolation => {
                return Error::constraint(msg.clone().unwrap_or_else(|| e.to_string()));
            }
            ErrorCode::CannotOpen | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                return Error::connectivity(err.to_string());
            }
            _ => {}
        }
    }

    Error::driver(err)
}
