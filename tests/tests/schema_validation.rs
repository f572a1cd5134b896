use tests::*;

use crumb::schema::{ColumnDef, TableDef};
use crumb::sqlite::Sqlite;
use crumb::stmt::{Value, ValueRecord};

#[derive(Debug, Default)]
struct Widget {
    id: Option<i64>,
    name: String,
}

impl FromRow for Widget {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            name: row.take(1).to_string()?,
        })
    }
}

impl Model for Widget {
    const TABLE: &'static str = "widget";

    fn table_def() -> TableDef {
        TableDef::new("widget")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("name"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.name).into()]
    }
}

#[tokio::test]
async fn registering_the_same_model_twice_fails_verification() {
    let mut builder = Db::builder();
    builder.register::<Widget>().register::<Widget>();

    let err = builder.connect(Sqlite::in_memory()).await.unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
}

#[tokio::test]
async fn unregistered_models_are_rejected_at_repository_construction() {
    let db = setup(|_| {}).await;
    assert!(Repository::<Widget>::new(&db).is_err());
}
