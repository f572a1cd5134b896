use super::*;
use crate::schema::{ColumnId, TableId};

#[derive(Debug, Clone)]
pub struct Insert {
    /// Table to insert into
    pub table: TableId,

    /// Columns the rows provide values for
    pub columns: Vec<ColumnId>,

    /// Rows to insert
    pub rows: Vec<Vec<Value>>,

    /// Expressions returned for each inserted row
    pub returning: Option<Vec<Expr>>,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
