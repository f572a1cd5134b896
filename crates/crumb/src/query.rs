use crate::{Cursor, Db, FromRow, Result};
use crumb_core::{
    schema::TableId,
    stmt::{Direction, Expr, Join, OrderByExpr, Select},
};

/// Composes a select statement from explicit parts.
///
/// Finder methods with fixed semantics are written as thin wrappers over
/// this builder; callers never supply SQL text.
pub struct SelectBuilder<T> {
    db: Db,
    select: Select,
    _p: std::marker::PhantomData<fn() -> T>,
}

impl<T: FromRow> SelectBuilder<T> {
    pub(crate) fn new(db: Db, select: Select) -> Self {
        Self {
            db,
            select,
            _p: std::marker::PhantomData,
        }
    }

    /// Restrict the results. Multiple filters are ANDed together.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.select.filter = Some(match self.select.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
        self
    }

    /// Join another table, typically on a declared foreign key.
    pub fn join(mut self, table: impl Into<TableId>, on: Expr) -> Self {
        self.select.source.joins.push(Join {
            table: table.into(),
            on,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, order: Direction) -> Self {
        self.select.order_by = Some(OrderByExpr { expr, order }.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.select.limit = Some(limit);
        self
    }

    /// Execute, returning all matching records.
    pub async fn all(self) -> Result<Cursor<T>> {
        self.db.all(self.select).await
    }

    /// Execute, returning all matching records as a vec.
    pub async fn collect(self) -> Result<Vec<T>> {
        self.all().await?.collect().await
    }

    /// Execute, returning the first matching record.
    pub async fn first(self) -> Result<Option<T>> {
        self.db.first(self.select).await
    }
}
