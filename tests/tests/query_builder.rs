use tests::*;

use crumb::schema::{ColumnDef, ForeignKeyDef, RefAction, TableDef};
use crumb::stmt::{Direction, Expr, Value, ValueRecord};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Author {
    id: Option<i64>,
    name: String,
}

impl FromRow for Author {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            name: row.take(1).to_string()?,
        })
    }
}

impl Model for Author {
    const TABLE: &'static str = "author";

    fn table_def() -> TableDef {
        TableDef::new("author")
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

#[derive(Debug, Default)]
struct Book {
    id: Option<i64>,
    title: String,
    author_id: Option<i64>,
}

impl FromRow for Book {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            title: row.take(1).to_string()?,
            author_id: row.take(2).to_option_i64()?,
        })
    }
}

impl Model for Book {
    const TABLE: &'static str = "book";

    fn table_def() -> TableDef {
        TableDef::new("book")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("title"))
            .column(ColumnDef::i64("author_id").nullable())
            .foreign_key(
                ForeignKeyDef::new("author_id", "author", "id").on_delete(RefAction::Cascade),
            )
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.title).into(), self.author_id.into()]
    }
}

/// Read-only join result; never persisted.
#[derive(Debug)]
struct BookWithAuthor {
    title: String,
    author: String,
}

impl FromRow for BookWithAuthor {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            title: row.take(0).to_string()?,
            author: row.take(1).to_string()?,
        })
    }
}

struct Library {
    authors: Repository<Author>,
    books: Repository<Book>,
}

async fn library() -> Library {
    let db = setup(|builder| {
        builder.register::<Author>().register::<Book>();
    })
    .await;

    let lib = Library {
        authors: Repository::new(&db).unwrap(),
        books: Repository::new(&db).unwrap(),
    };

    for (name, titles) in [
        ("Le Guin", vec!["The Dispossessed", "The Lathe of Heaven"]),
        ("Borges", vec!["Ficciones"]),
    ] {
        let mut author = Author {
            id: None,
            name: name.to_string(),
        };
        lib.authors.save(&mut author).await.unwrap();

        for title in titles {
            let mut book = Book {
                id: None,
                title: title.to_string(),
                author_id: author.id(),
            };
            lib.books.save(&mut book).await.unwrap();
        }
    }

    lib
}

#[tokio::test]
async fn filters_are_anded_together() {
    let lib = library().await;

    let matched: Vec<Book> = lib
        .books
        .select()
        .filter(Expr::contains_ignore_case(
            lib.books.col("title").unwrap(),
            "the",
        ))
        .filter(Expr::eq(lib.books.col("title").unwrap(), "Ficciones"))
        .collect()
        .await
        .unwrap();

    assert!(matched.is_empty());
}

#[tokio::test]
async fn contains_ignore_case_matches_substrings() {
    let lib = library().await;

    let matched: Vec<Book> = lib
        .books
        .select()
        .filter(Expr::contains_ignore_case(
            lib.books.col("title").unwrap(),
            "LATHE",
        ))
        .collect()
        .await
        .unwrap();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "The Lathe of Heaven");
}

#[tokio::test]
async fn order_by_desc_with_limit_selects_the_top_row() {
    let lib = library().await;

    let top: Option<Book> = lib
        .books
        .select()
        .order_by(lib.books.col("id").unwrap(), Direction::Desc)
        .limit(1)
        .first()
        .await
        .unwrap();

    assert_eq!(top.unwrap().title, "Ficciones");
}

#[tokio::test]
async fn first_on_no_matches_is_none() {
    let lib = library().await;

    let missing: Option<Book> = lib
        .books
        .select()
        .filter(Expr::eq(lib.books.col("title").unwrap(), "missing"))
        .first()
        .await
        .unwrap();

    assert!(missing.is_none());
}

#[tokio::test]
async fn join_filters_on_the_parent_table() {
    let lib = library().await;

    let on = Expr::eq(
        lib.books.col("author_id").unwrap(),
        lib.authors.col("id").unwrap(),
    );

    let matched: Vec<Book> = lib
        .books
        .select()
        .join(lib.authors.table().id, on)
        .filter(Expr::eq(lib.authors.col("name").unwrap(), "Le Guin"))
        .collect()
        .await
        .unwrap();

    assert_eq!(matched.len(), 2);
}

#[tokio::test]
async fn projections_return_joined_columns() {
    let lib = library().await;

    let on = Expr::eq(
        lib.books.col("author_id").unwrap(),
        lib.authors.col("id").unwrap(),
    );
    let returning = vec![
        lib.books.col("title").unwrap(),
        lib.authors.col("name").unwrap(),
    ];

    let mut rows: Vec<BookWithAuthor> = lib
        .books
        .select_as(returning)
        .join(lib.authors.table().id, on)
        .collect()
        .await
        .unwrap();
    rows.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].title, "Ficciones");
    assert_eq!(rows[0].author, "Borges");
}

#[tokio::test]
async fn concat_matches_are_order_sensitive() {
    let lib = library().await;

    let full = |value: &str| {
        Expr::eq(
            Expr::concat(vec![
                lib.books.col("title").unwrap(),
                Expr::value(" by "),
                lib.authors.col("name").unwrap(),
            ]),
            value,
        )
    };
    let on = Expr::eq(
        lib.books.col("author_id").unwrap(),
        lib.authors.col("id").unwrap(),
    );

    let matched: Vec<Book> = lib
        .books
        .select()
        .join(lib.authors.table().id, on.clone())
        .filter(full("Ficciones by Borges"))
        .collect()
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);

    let reversed: Vec<Book> = lib
        .books
        .select()
        .join(lib.authors.table().id, on)
        .filter(full("Borges by Ficciones"))
        .collect()
        .await
        .unwrap();
    assert!(reversed.is_empty());
}
