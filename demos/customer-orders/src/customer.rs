use crumb::{
    schema::{ColumnDef, TableDef},
    stmt::{Assignments, Direction, Expr, Update, Value, ValueRecord},
    Cursor, Db, Error, FromRow, Model, Repository, Result,
};

use crate::Order;

/// A customer with an owned collection of orders.
///
/// The identity is assigned on first save and never changes afterwards.
/// `orders` is populated only by the explicit with-orders finder; plain
/// finders load the customer shallow.
#[derive(Debug, Default)]
pub struct Customer {
    id: Option<i64>,
    pub first_name: String,
    pub last_name: String,

    /// Opaque JSON document, stored as text
    pub meta_data: String,

    pub orders: Vec<Order>,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        meta_data: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            meta_data: meta_data.into(),
            orders: vec![],
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl FromRow for Customer {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            first_name: row.take(1).to_string()?,
            last_name: row.take(2).to_string()?,
            meta_data: row.take(3).to_string()?,
            orders: vec![],
        })
    }
}

impl Model for Customer {
    const TABLE: &'static str = "customer";

    fn table_def() -> TableDef {
        TableDef::new("customer")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("first_name"))
            .column(ColumnDef::text("last_name"))
            .column(ColumnDef::json("meta_data"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![
            (&self.first_name).into(),
            (&self.last_name).into(),
            (&self.meta_data).into(),
        ]
    }

    fn validate(&self) -> Result<()> {
        if self.first_name.is_empty() {
            return Err(Error::validation("customer.first_name must not be empty"));
        }
        if self.last_name.is_empty() {
            return Err(Error::validation("customer.last_name must not be empty"));
        }
        Ok(())
    }
}

pub struct CustomerRepository {
    customers: Repository<Customer>,
    orders: Repository<Order>,
}

impl CustomerRepository {
    pub fn new(db: &Db) -> Result<Self> {
        Ok(Self {
            customers: Repository::new(db)?,
            orders: Repository::new(db)?,
        })
    }

    /// Persist the customer, and any orders it owns, atomically.
    ///
    /// Inserts assign the identity; a customer whose identity is already set
    /// is updated in place.
    pub async fn save(&self, customer: &mut Customer) -> Result<()> {
        if customer.orders.is_empty() {
            return self.customers.save(customer).await;
        }

        let mut tx = self.customers.db().begin().await?;
        self.customers.save_in(&mut tx, customer).await?;

        let id = customer.id();
        for order in &mut customer.orders {
            order.customer_id = id;
            self.orders.save_in(&mut tx, order).await?;
        }

        tx.commit().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        self.customers.find_by_id(id).await
    }

    /// Like [`find_by_id`](Self::find_by_id), but also loads the customer's
    /// orders.
    pub async fn find_by_id_with_orders(&self, id: i64) -> Result<Option<Customer>> {
        let Some(mut customer) = self.customers.find_by_id(id).await? else {
            return Ok(None);
        };

        customer.orders = self
            .orders
            .select()
            .filter(Expr::eq(self.orders.col("customer_id")?, id))
            .collect()
            .await?;

        Ok(Some(customer))
    }

    pub async fn find_all(&self) -> Result<Cursor<Customer>> {
        self.customers.find_all().await
    }

    /// Customers whose last name equals `last_name`, case-sensitive.
    pub async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>> {
        self.customers
            .select()
            .filter(Expr::eq(self.customers.col("last_name")?, last_name))
            .collect()
            .await
    }

    /// The customer with the largest identity, or `None` when the table is
    /// empty.
    pub async fn find_top_by_id_desc(&self) -> Result<Option<Customer>> {
        self.customers
            .select()
            .order_by(self.customers.col("id")?, Direction::Desc)
            .first()
            .await
    }

    /// Customers whose first and last name, joined by a single space, equal
    /// `full_name`. "Palmer David" does not match "David Palmer".
    pub async fn find_by_full_name(&self, full_name: &str) -> Result<Vec<Customer>> {
        let concat = Expr::concat(vec![
            self.customers.col("first_name")?,
            Expr::value(" "),
            self.customers.col("last_name")?,
        ]);

        self.customers
            .select()
            .filter(Expr::eq(concat, full_name))
            .collect()
            .await
    }

    /// Delete the customer. Its orders are removed by the cascade declared
    /// on `orders.customer_id`.
    pub async fn delete(&self, customer: &Customer) -> Result<()> {
        self.customers.delete(customer).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.customers.count().await
    }

    /// Apply an RFC 7386 merge-patch to the customer's stored metadata.
    ///
    /// The merge is computed by the storage engine within a single update
    /// statement, so a concurrent reader observes either the pre-patch or
    /// the fully patched document.
    pub async fn merge_metadata(&self, customer: &Customer, patch: &str) -> Result<()> {
        let Some(id) = customer.id() else {
            return Err(Error::not_found("customer has not been persisted"));
        };

        let meta_data = self.customers.column_id("meta_data")?;

        let mut assignments = Assignments::default();
        assignments.set(meta_data, Expr::json_patch(Expr::column(meta_data), patch));

        let update = Update {
            table: self.customers.table().id,
            assignments,
            filter: Some(Expr::eq(self.customers.col("id")?, id)),
            returning: None,
        };

        let count = self
            .customers
            .db()
            .exec(update.into())
            .await?
            .into_count()?;
        if count == 0 {
            return Err(Error::not_found(format!("customer id={id}")));
        }

        Ok(())
    }
}
