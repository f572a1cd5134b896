use crate::{Cursor, Db, Executor, Model, Result, SelectBuilder, Transaction};
use crumb_core::{
    schema::{ColumnId, Table, TableId},
    stmt::{Assignments, Delete, Expr, Insert, Select, Statement, Update},
    Error,
};

/// Generic mapping-layer CRUD for one model.
///
/// Typed finders are built on top via [`Repository::select`]; see the query
/// builder for composition.
pub struct Repository<M> {
    db: Db,
    table: TableId,
    _p: std::marker::PhantomData<fn() -> M>,
}

impl<M: Model> Repository<M> {
    /// Resolve the model's table in the connected schema.
    pub fn new(db: &Db) -> Result<Self> {
        let table = db
            .schema()
            .table_by_name(M::TABLE)
            .ok_or_else(|| {
                Error::invalid_statement(format!("table `{}` is not registered", M::TABLE))
            })?
            .id;

        Ok(Self {
            db: db.clone(),
            table,
            _p: std::marker::PhantomData,
        })
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn table(&self) -> &Table {
        self.db.schema().table(self.table)
    }

    /// Expression referencing one of the model's columns by name.
    pub fn col(&self, name: &str) -> Result<Expr> {
        Ok(Expr::column(self.column_id(name)?))
    }

    /// Resolve one of the model's columns by name.
    pub fn column_id(&self, name: &str) -> Result<ColumnId> {
        self.table()
            .column_by_name(name)
            .map(|column| column.id)
            .ok_or_else(|| {
                Error::invalid_statement(format!("unknown column `{}.{name}`", M::TABLE))
            })
    }

    /// A select over the model's own columns.
    pub fn select(&self) -> SelectBuilder<M> {
        let returning = self.table().columns.iter().map(Expr::column).collect();
        SelectBuilder::new(self.db.clone(), Select::new(self.table, returning))
    }

    /// A select producing a custom projection.
    pub fn select_as<T: crate::FromRow>(&self, returning: Vec<Expr>) -> SelectBuilder<T> {
        SelectBuilder::new(self.db.clone(), Select::new(self.table, returning))
    }

    /// Insert the entity (assigning its identity) or update the existing row
    /// when the identity is already set.
    pub async fn save(&self, entity: &mut M) -> Result<()> {
        let mut db = self.db.clone();
        self.save_with(&mut db, entity).await
    }

    /// Like [`save`](Self::save), but within an open transaction.
    pub async fn save_in(&self, tx: &mut Transaction<'_>, entity: &mut M) -> Result<()> {
        self.save_with(tx, entity).await
    }

    async fn save_with<E: Executor>(&self, exec: &mut E, entity: &mut M) -> Result<()> {
        entity.validate()?;

        let table = self.table();
        let columns: Vec<ColumnId> = table
            .columns
            .iter()
            .filter(|column| !column.primary_key)
            .map(|column| column.id)
            .collect();

        let values = entity.values();
        if values.len() != columns.len() {
            return Err(Error::invalid_statement(format!(
                "`{}` provided {} values for {} columns",
                M::TABLE,
                values.len(),
                columns.len()
            )));
        }

        match entity.id() {
            None => {
                let insert = Insert {
                    table: self.table,
                    columns,
                    rows: vec![values],
                    returning: Some(vec![Expr::column(table.primary_key_column())]),
                };

                let rows = exec.exec(insert.into()).await?.into_rows()?;
                let mut row = rows.into_iter().next().ok_or_else(|| {
                    Error::invalid_statement("insert did not return an identity")
                })?;

                entity.record_id(row.take(0).to_i64()?);
            }
            Some(id) => {
                let mut assignments = Assignments::default();
                for (column, value) in columns.into_iter().zip(values) {
                    assignments.set(column, Expr::Value(value));
                }

                let update = Update {
                    table: self.table,
                    assignments,
                    filter: Some(Expr::eq(self.pk_expr(), id)),
                    returning: None,
                };

                let count = exec.exec(update.into()).await?.into_count()?;
                if count == 0 {
                    return Err(Error::not_found(format!("{} id={id}", M::TABLE)));
                }
            }
        }

        Ok(())
    }

    /// Returns the matching entity, or `None` when the identity is unknown.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<M>> {
        self.select()
            .filter(Expr::eq(self.pk_expr(), id))
            .first()
            .await
    }

    /// All entities of the model's type, in unspecified order.
    pub async fn find_all(&self) -> Result<Cursor<M>> {
        self.select().all().await
    }

    /// Delete the entity's row. Owned child rows go away via the schema's
    /// referential actions.
    pub async fn delete(&self, entity: &M) -> Result<()> {
        let Some(id) = entity.id() else {
            return Err(Error::not_found(format!(
                "{} has not been persisted",
                M::TABLE
            )));
        };

        let delete = Delete {
            table: self.table,
            filter: Some(Expr::eq(self.pk_expr(), id)),
        };

        let count = self.db.exec(delete.into()).await?.into_count()?;
        if count == 0 {
            return Err(Error::not_found(format!("{} id={id}", M::TABLE)));
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let select = Select::new(self.table, vec![Expr::count()]);
        self.count_rows(select).await
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let mut select = Select::new(self.table, vec![Expr::count()]);
        select.filter = Some(Expr::eq(self.pk_expr(), id));
        Ok(self.count_rows(select).await? > 0)
    }

    async fn count_rows(&self, select: Select) -> Result<u64> {
        let rows = self
            .db
            .exec(Statement::from(select))
            .await?
            .into_rows()?;
        let mut row = rows
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_statement("count returned no rows"))?;
        Ok(row.take(0).to_i64()? as u64)
    }

    fn pk_expr(&self) -> Expr {
        Expr::column(self.table().primary_key_column())
    }
}
