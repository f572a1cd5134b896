use crate::Result;
use crumb_core::{
    schema::TableDef,
    stmt::{Value, ValueRecord},
};

/// Materializes a type from a returned row.
///
/// Implemented by models and by read-only projections.
pub trait FromRow: Sized {
    /// Populate fields from the given row, in returning order.
    fn from_row(row: ValueRecord) -> Result<Self>;
}

/// A persistent entity mapped to a table.
///
/// Implementations are registered with [`crate::db::Builder`] at startup;
/// the trait is the explicit equivalent of annotation-driven field-to-column
/// mapping.
pub trait Model: FromRow + Send + Sync + 'static {
    /// Name of the table the model maps to
    const TABLE: &'static str;

    /// Declarative table definition, registered at startup
    fn table_def() -> TableDef;

    /// The entity's identity, if it has been persisted
    fn id(&self) -> Option<i64>;

    /// Records the identity assigned on first insert.
    ///
    /// Called exactly once per entity; the identity never changes afterwards.
    fn record_id(&mut self, id: i64);

    /// Values for all non-key columns, in `table_def` order
    fn values(&self) -> Vec<Value>;

    /// Validates required fields before persisting
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
