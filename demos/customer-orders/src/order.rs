use crumb::{
    schema::{ColumnDef, ForeignKeyDef, RefAction, TableDef},
    stmt::{Expr, Value, ValueRecord},
    Db, Error, FromRow, Model, Repository, Result,
};

use crate::Customer;

/// An order placed by exactly one customer.
#[derive(Debug, Default)]
pub struct Order {
    id: Option<i64>,
    pub description: String,

    /// The owning customer; nullable only before assignment
    pub customer_id: Option<i64>,
}

impl Order {
    pub fn new(customer: &Customer, description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
            customer_id: customer.id(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }
}

impl FromRow for Order {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_option_i64()?,
            description: row.take(1).to_string()?,
            customer_id: row.take(2).to_option_i64()?,
        })
    }
}

impl Model for Order {
    const TABLE: &'static str = "orders";

    fn table_def() -> TableDef {
        TableDef::new("orders")
            .column(ColumnDef::primary_key("id"))
            .column(ColumnDef::text("description"))
            .column(ColumnDef::i64("customer_id").nullable())
            .foreign_key(
                ForeignKeyDef::new("customer_id", "customer", "id")
                    .on_delete(RefAction::Cascade),
            )
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn record_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<Value> {
        vec![(&self.description).into(), self.customer_id.into()]
    }

    fn validate(&self) -> Result<()> {
        if self.description.is_empty() {
            return Err(Error::validation("orders.description must not be empty"));
        }
        Ok(())
    }
}

/// A read-only view of an order joined with its customer's name.
///
/// Produced by the projection queries; never persisted.
#[derive(Debug)]
pub struct OrderInfo {
    pub id: i64,
    pub description: String,
    pub first_name: String,
    pub last_name: String,
}

impl FromRow for OrderInfo {
    fn from_row(mut row: ValueRecord) -> Result<Self> {
        Ok(Self {
            id: row.take(0).to_i64()?,
            description: row.take(1).to_string()?,
            first_name: row.take(2).to_string()?,
            last_name: row.take(3).to_string()?,
        })
    }
}

pub struct OrderRepository {
    orders: Repository<Order>,
    customers: Repository<Customer>,
}

impl OrderRepository {
    pub fn new(db: &Db) -> Result<Self> {
        Ok(Self {
            orders: Repository::new(db)?,
            customers: Repository::new(db)?,
        })
    }

    pub async fn save(&self, order: &mut Order) -> Result<()> {
        self.orders.save(order).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>> {
        self.orders.find_by_id(id).await
    }

    /// Orders owned by the given customer.
    pub async fn find_all_by_customer(&self, customer: &Customer) -> Result<Vec<Order>> {
        let Some(id) = customer.id() else {
            return Ok(vec![]);
        };

        self.orders
            .select()
            .filter(Expr::eq(self.orders.col("customer_id")?, id))
            .collect()
            .await
    }

    /// Orders whose description contains `query`, case-insensitive.
    pub async fn find_all_by_description_contains_ignore_case(
        &self,
        query: &str,
    ) -> Result<Vec<Order>> {
        self.orders
            .select()
            .filter(Expr::contains_ignore_case(
                self.orders.col("description")?,
                query,
            ))
            .collect()
            .await
    }

    /// Orders whose owning customer has the given last name, joining across
    /// the relationship.
    pub async fn find_by_customer_last_name(&self, last_name: &str) -> Result<Vec<Order>> {
        self.orders
            .select()
            .join(self.customers.table().id, self.join_on()?)
            .filter(Expr::eq(self.customers.col("last_name")?, last_name))
            .collect()
            .await
    }

    /// Every order as an [`OrderInfo`] projection.
    pub async fn find_all_with_info(&self) -> Result<Vec<OrderInfo>> {
        self.orders
            .select_as::<OrderInfo>(self.info_returning()?)
            .join(self.customers.table().id, self.join_on()?)
            .collect()
            .await
    }

    /// The given customer's orders as [`OrderInfo`] projections.
    pub async fn find_all_by_customer_with_info(
        &self,
        customer: &Customer,
    ) -> Result<Vec<OrderInfo>> {
        let Some(id) = customer.id() else {
            return Ok(vec![]);
        };

        self.orders
            .select_as::<OrderInfo>(self.info_returning()?)
            .join(self.customers.table().id, self.join_on()?)
            .filter(Expr::eq(self.orders.col("customer_id")?, id))
            .collect()
            .await
    }

    pub async fn delete(&self, order: &Order) -> Result<()> {
        self.orders.delete(order).await
    }

    fn join_on(&self) -> Result<Expr> {
        Ok(Expr::eq(
            self.orders.col("customer_id")?,
            self.customers.col("id")?,
        ))
    }

    fn info_returning(&self) -> Result<Vec<Expr>> {
        Ok(vec![
            self.orders.col("id")?,
            self.orders.col("description")?,
            self.customers.col("first_name")?,
            self.customers.col("last_name")?,
        ])
    }
}
