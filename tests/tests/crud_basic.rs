use tests::*;

use crumb::schema::{ColumnDef, TableDef};
use crumb::stmt::{Value, ValueRecord};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq)]
struct Task {
    id: Option<i64>,
    title: String,
}

impl Task {
    fn new(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
        }
    }
}

impl FromRow for Task {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            title: row.take(1).to_string()?,
        })
    }
}

impl Model for Task {
    const TABLE: &'static str = "task";

    fn table_def() -> TableDef {
        TableDef::new("task")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("title"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.title).into()]
    }

    fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(Error::validation("task.title must not be empty"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn insert_assigns_identity() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    let mut first = Task::new("write tests");
    let mut second = Task::new("run tests");
    tasks.save(&mut first).await.unwrap();
    tasks.save(&mut second).await.unwrap();

    assert!(first.id().unwrap() > 0);
    assert!(second.id().unwrap() > first.id().unwrap());
}

#[tokio::test]
async fn find_by_id_round_trips() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    let mut task = Task::new("write tests");
    tasks.save(&mut task).await.unwrap();

    let reloaded = tasks.find_by_id(task.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(reloaded, task);

    assert!(tasks.find_by_id(9000).await.unwrap().is_none());
}

#[tokio::test]
async fn save_with_identity_updates() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    let mut task = Task::new("write tests");
    tasks.save(&mut task).await.unwrap();

    task.title = "rewrite tests".to_string();
    tasks.save(&mut task).await.unwrap();

    let reloaded = tasks.find_by_id(task.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(reloaded.title, "rewrite tests");
    assert_eq!(tasks.count().await.unwrap(), 1);
}

#[tokio::test]
async fn find_all_streams_every_row() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    for title in ["a", "b", "c"] {
        tasks.save(&mut Task::new(title)).await.unwrap();
    }

    let mut cursor = tasks.find_all().await.unwrap();
    let mut titles = vec![];
    while let Some(task) = cursor.next().await {
        titles.push(task.unwrap().title);
    }
    titles.sort();
    assert_eq!(titles, ["a", "b", "c"]);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    let mut task = Task::new("write tests");
    tasks.save(&mut task).await.unwrap();
    let id = task.id().unwrap();

    tasks.delete(&task).await.unwrap();
    assert!(tasks.find_by_id(id).await.unwrap().is_none());
    assert!(!tasks.exists_by_id(id).await.unwrap());

    // Deleting again reports the missing row
    assert!(tasks.delete(&task).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn validation_runs_before_the_insert() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    let err = tasks.save(&mut Task::new("")).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(tasks.count().await.unwrap(), 0);
}

#[tokio::test]
async fn count_and_exists() {
    let db = setup(|builder| {
        builder.register::<Task>();
    })
    .await;
    let tasks = Repository::<Task>::new(&db).unwrap();

    assert_eq!(tasks.count().await.unwrap(), 0);

    let mut task = Task::new("write tests");
    tasks.save(&mut task).await.unwrap();

    assert_eq!(tasks.count().await.unwrap(), 1);
    assert!(tasks.exists_by_id(task.id().unwrap()).await.unwrap());
    assert!(!tasks.exists_by_id(9000).await.unwrap());
}
