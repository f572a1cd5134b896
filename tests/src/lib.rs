pub use crumb::*;

/// Build an in-memory database with the given models registered and the
/// schema pushed.
pub async fn setup(register: impl FnOnce(&mut db::Builder)) -> Db {
    let mut builder = Db::builder();
    register(&mut builder);

    let db = builder
        .connect(sqlite::Sqlite::in_memory())
        .await
        .expect("failed to connect");
    db.push_schema().await.expect("failed to push schema");
    db
}
