mod ddl;

mod expr;

mod ident;
use ident::Ident;

use crumb_core::{
    driver::operation::Transaction,
    schema::Schema,
    stmt::{self, Statement, Value},
};

/// Serialize a statement to a SQL string, collecting bound parameters.
///
/// SQLite dialect.
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    schema: &'a Schema,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut Vec<Value>,

    /// True when column references are qualified with their table name.
    /// Required for selects (which may join), not permitted in insert
    /// column lists or RETURNING clauses.
    qualify: bool,
}

impl<'a> Serializer<'a> {
    pub fn sqlite(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut Vec<Value>) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            qualify: matches!(stmt, Statement::Query(_)),
        };

        fmt.statement(stmt);

        ret.push(';');
        ret
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn serialize_transaction(&self, op: Transaction) -> &'static str {
        match op {
            Transaction::Start => "BEGIN",
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
    }

    fn table_name(&self, id: impl Into<crumb_core::schema::TableId>) -> Ident<&str> {
        Ident(&self.schema.table(id.into()).name)
    }

    fn column_name(&self, id: impl Into<crumb_core::schema::ColumnId>) -> Ident<&str> {
        Ident(&self.schema.column(id.into()).name)
    }
}

impl Formatter<'_> {
    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Delete(stmt) => self.delete(stmt),
            Statement::Insert(stmt) => self.insert(stmt),
            Statement::Query(stmt) => self.select(stmt),
            Statement::Update(stmt) => self.update(stmt),
        }
    }

    fn select(&mut self, stmt: &stmt::Select) {
        self.push("SELECT ");
        self.returning(&stmt.returning);

        self.push(" FROM ");
        self.table(stmt.source.table);

        for join in &stmt.source.joins {
            self.push(" JOIN ");
            self.table(join.table);
            self.push(" ON ");
            self.expr(&join.on);
        }

        self.filter(stmt.filter.as_ref());

        if let Some(order_by) = &stmt.order_by {
            self.push(" ORDER BY ");
            for (i, order_by_expr) in order_by.exprs.iter().enumerate() {
                if i > 0 {
                    self.push(", ");
                }
                self.expr(&order_by_expr.expr);
                self.push(match order_by_expr.order {
                    stmt::Direction::Asc => " ASC",
                    stmt::Direction::Desc => " DESC",
                });
            }
        }

        if let Some(limit) = stmt.limit {
            self.push(" LIMIT ");
            self.push(&limit.to_string());
        }
    }

    fn insert(&mut self, stmt: &stmt::Insert) {
        self.push("INSERT INTO ");
        self.table(stmt.table);

        self.push(" (");
        for (i, column) in stmt.columns.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.column(*column);
        }
        self.push(") VALUES ");

        for (i, row) in stmt.rows.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    self.push(", ");
                }
                self.value(value.clone());
            }
            self.push(")");
        }

        self.insert_returning(stmt.returning.as_deref());
    }

    fn update(&mut self, stmt: &stmt::Update) {
        self.push("UPDATE ");
        self.table(stmt.table);
        self.push(" SET ");

        for (i, assignment) in stmt.assignments.items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.column(assignment.column);
            self.push(" = ");
            self.expr(&assignment.expr);
        }

        self.filter(stmt.filter.as_ref());
        self.insert_returning(stmt.returning.as_deref());
    }

    fn delete(&mut self, stmt: &stmt::Delete) {
        self.push("DELETE FROM ");
        self.table(stmt.table);
        self.filter(stmt.filter.as_ref());
    }

    fn filter(&mut self, filter: Option<&stmt::Expr>) {
        if let Some(filter) = filter {
            self.push(" WHERE ");
            self.expr(filter);
        }
    }

    fn returning(&mut self, exprs: &[stmt::Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(expr);
        }
    }

    fn insert_returning(&mut self, returning: Option<&[stmt::Expr]>) {
        if let Some(returning) = returning {
            self.push(" RETURNING ");
            self.returning(returning);
        }
    }

    fn table(&mut self, id: crumb_core::schema::TableId) {
        let name = self.serializer.table_name(id).to_string();
        self.push(&name);
    }

    fn column(&mut self, id: crumb_core::schema::ColumnId) {
        if self.qualify {
            let table = self.serializer.table_name(id.table).to_string();
            self.push(&table);
            self.push(".");
        }
        let name = self.serializer.column_name(id).to_string();
        self.push(&name);
    }

    fn value(&mut self, value: Value) {
        self.params.push(value);
        self.push("?");
    }

    fn push(&mut self, s: &str) {
        self.dst.push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumb_core::schema::{ColumnDef, ForeignKeyDef, RefAction, TableDef};
    use crumb_core::stmt::{Assignments, Delete, Expr, Insert, Select, Source, Update};

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder
            .register(
                TableDef::new("customer")
                    .column(ColumnDef::primary_key("id"))
                    .column(ColumnDef::text("first_name"))
                    .column(ColumnDef::text("last_name"))
                    .column(ColumnDef::json("meta_data")),
            )
            .register(
                TableDef::new("orders")
                    .column(ColumnDef::primary_key("id"))
                    .column(ColumnDef::text("description"))
                    .column(ColumnDef::i64("customer_id").nullable())
                    .foreign_key(
                        ForeignKeyDef::new("customer_id", "customer", "id")
                            .on_delete(RefAction::Cascade),
                    ),
            );
        builder.build().unwrap()
    }

    fn serialize(schema: &Schema, stmt: impl Into<Statement>) -> (String, Vec<Value>) {
        let mut params = vec![];
        let sql = Serializer::sqlite(schema).serialize(&stmt.into(), &mut params);
        (sql, params)
    }

    #[test]
    fn select_with_filter() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();

        let mut select = Select::new(
            customer.id,
            customer.columns.iter().map(Expr::column).collect(),
        );
        select.filter = Some(Expr::eq(
            Expr::column(customer.column_by_name("last_name").unwrap()),
            "Bauer",
        ));

        let (sql, params) = serialize(&schema, select);
        assert_eq!(
            sql,
            "SELECT \"customer\".\"id\", \"customer\".\"first_name\", \
             \"customer\".\"last_name\", \"customer\".\"meta_data\" \
             FROM \"customer\" WHERE \"customer\".\"last_name\" = ?;"
        );
        assert_eq!(params, vec![Value::from("Bauer")]);
    }

    #[test]
    fn select_order_by_desc_limit() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();

        let mut select = Select::new(customer.id, vec![Expr::column(&customer.columns[0])]);
        select.order_by = Some(
            stmt::OrderByExpr {
                expr: Expr::column(&customer.columns[0]),
                order: stmt::Direction::Desc,
            }
            .into(),
        );
        select.limit = Some(1);

        let (sql, params) = serialize(&schema, select);
        assert_eq!(
            sql,
            "SELECT \"customer\".\"id\" FROM \"customer\" \
             ORDER BY \"customer\".\"id\" DESC LIMIT 1;"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn select_join_on_foreign_key() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();
        let orders = schema.table_by_name("orders").unwrap();

        let mut select = Select::new(
            Source {
                table: orders.id,
                joins: vec![stmt::Join {
                    table: customer.id,
                    on: Expr::eq(
                        Expr::column(orders.column_by_name("customer_id").unwrap()),
                        Expr::column(customer.column_by_name("id").unwrap()),
                    ),
                }],
            },
            vec![Expr::column(&orders.columns[0])],
        );
        select.filter = Some(Expr::eq(
            Expr::column(customer.column_by_name("last_name").unwrap()),
            "Bauer",
        ));

        let (sql, _) = serialize(&schema, select);
        assert_eq!(
            sql,
            "SELECT \"orders\".\"id\" FROM \"orders\" \
             JOIN \"customer\" ON \"orders\".\"customer_id\" = \"customer\".\"id\" \
             WHERE \"customer\".\"last_name\" = ?;"
        );
    }

    #[test]
    fn contains_ignore_case_expands_to_like() {
        let schema = schema();
        let orders = schema.table_by_name("orders").unwrap();

        let mut select = Select::new(orders.id, vec![Expr::column(&orders.columns[0])]);
        select.filter = Some(Expr::contains_ignore_case(
            Expr::column(orders.column_by_name("description").unwrap()),
            "apple",
        ));

        let (sql, params) = serialize(&schema, select);
        assert_eq!(
            sql,
            "SELECT \"orders\".\"id\" FROM \"orders\" WHERE \
             LOWER(\"orders\".\"description\") LIKE (? || LOWER(?) || ?);"
        );
        assert_eq!(
            params,
            vec![
                Value::from("%"),
                Value::from("apple"),
                Value::from("%"),
            ]
        );
    }

    #[test]
    fn insert_returning_id() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();

        let insert = Insert {
            table: customer.id,
            columns: customer.columns[1..].iter().map(|c| c.id).collect(),
            rows: vec![vec![
                Value::from("Jack"),
                Value::from("Bauer"),
                Value::from("{}"),
            ]],
            returning: Some(vec![Expr::column(&customer.columns[0])]),
        };

        let (sql, params) = serialize(&schema, insert);
        assert_eq!(
            sql,
            "INSERT INTO \"customer\" (\"first_name\", \"last_name\", \"meta_data\") \
             VALUES (?, ?, ?) RETURNING \"id\";"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn update_with_json_patch() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();
        let meta_data = customer.column_by_name("meta_data").unwrap();

        let mut assignments = Assignments::default();
        assignments.set(
            meta_data,
            Expr::json_patch(Expr::column(meta_data), "{\"zip\": 94086}"),
        );

        let update = Update {
            table: customer.id,
            assignments,
            filter: Some(Expr::eq(Expr::column(&customer.columns[0]), 1i64)),
            returning: None,
        };

        let (sql, params) = serialize(&schema, update);
        assert_eq!(
            sql,
            "UPDATE \"customer\" SET \"meta_data\" = \
             json_patch(\"meta_data\", ?) WHERE \"id\" = ?;"
        );
        assert_eq!(
            params,
            vec![Value::from("{\"zip\": 94086}"), Value::from(1i64)]
        );
    }

    #[test]
    fn delete_by_id() {
        let schema = schema();
        let orders = schema.table_by_name("orders").unwrap();

        let delete = Delete {
            table: orders.id,
            filter: Some(Expr::eq(Expr::column(&orders.columns[0]), 7i64)),
        };

        let (sql, params) = serialize(&schema, delete);
        assert_eq!(sql, "DELETE FROM \"orders\" WHERE \"id\" = ?;");
        assert_eq!(params, vec![Value::from(7i64)]);
    }

    #[test]
    fn count_star() {
        let schema = schema();
        let customer = schema.table_by_name("customer").unwrap();

        let select = Select::new(customer.id, vec![Expr::count()]);
        let (sql, _) = serialize(&schema, select);
        assert_eq!(sql, "SELECT COUNT(*) FROM \"customer\";");
    }

    #[test]
    fn create_table_with_foreign_key() {
        let schema = schema();
        let orders = schema.table_by_name("orders").unwrap();

        let sql = Serializer::sqlite(&schema).create_table(orders);
        assert_eq!(
            sql,
            "CREATE TABLE \"orders\" (\
             \"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
             \"description\" TEXT NOT NULL, \
             \"customer_id\" INTEGER, \
             FOREIGN KEY (\"customer_id\") REFERENCES \"customer\" (\"id\") \
             ON DELETE CASCADE);"
        );
    }
}
