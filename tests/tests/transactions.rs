use tests::*;

use crumb::schema::{ColumnDef, TableDef};
use crumb::stmt::{Value, ValueRecord};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Note {
    id: Option<i64>,
    body: String,
}

impl Note {
    fn new(body: &str) -> Self {
        Self {
            id: None,
            body: body.to_string(),
        }
    }
}

impl FromRow for Note {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            body: row.take(1).to_string()?,
        })
    }
}

impl Model for Note {
    const TABLE: &'static str = "note";

    fn table_def() -> TableDef {
        TableDef::new("note")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("body"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.body).into()]
    }
}

#[tokio::test]
async fn committed_writes_are_visible() {
    let db = setup(|builder| {
        builder.register::<Note>();
    })
    .await;
    let notes = Repository::<Note>::new(&db).unwrap();

    let mut tx = db.begin().await.unwrap();
    let mut first = Note::new("first");
    let mut second = Note::new("second");
    notes.save_in(&mut tx, &mut first).await.unwrap();
    notes.save_in(&mut tx, &mut second).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(notes.count().await.unwrap(), 2);
}

#[tokio::test]
async fn rolled_back_writes_are_discarded() {
    let db = setup(|builder| {
        builder.register::<Note>();
    })
    .await;
    let notes = Repository::<Note>::new(&db).unwrap();

    let mut tx = db.begin().await.unwrap();
    notes.save_in(&mut tx, &mut Note::new("doomed")).await.unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(notes.count().await.unwrap(), 0);
}

#[tokio::test]
async fn dropped_transaction_rolls_back_before_the_next_operation() {
    let db = setup(|builder| {
        builder.register::<Note>();
    })
    .await;
    let notes = Repository::<Note>::new(&db).unwrap();

    {
        let mut tx = db.begin().await.unwrap();
        notes
            .save_in(&mut tx, &mut Note::new("abandoned"))
            .await
            .unwrap();
        // dropped without commit
    }

    assert_eq!(notes.count().await.unwrap(), 0);

    // The connection is usable again afterwards
    let mut note = Note::new("kept");
    notes.save(&mut note).await.unwrap();
    assert_eq!(notes.count().await.unwrap(), 1);
}
