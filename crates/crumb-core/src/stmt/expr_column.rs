use super::*;
use crate::schema::ColumnId;

/// References a column in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprColumn {
    pub column: ColumnId,
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl From<ColumnId> for Expr {
    fn from(value: ColumnId) -> Self {
        Self::Column(ExprColumn { column: value })
    }
}
