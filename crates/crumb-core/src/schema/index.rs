use super::{ColumnId, TableId};

/// A secondary index over one or more columns.
#[derive(Debug)]
pub struct Index {
    pub table: TableId,

    /// Name of the index in the database
    pub name: String,

    pub columns: Vec<ColumnId>,

    pub unique: bool,
}
