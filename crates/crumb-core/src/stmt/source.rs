use super::Expr;
use crate::schema::TableId;

/// The table a statement selects from, plus any joined tables.
#[derive(Debug, Clone)]
pub struct Source {
    pub table: TableId,
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone)]
pub struct Join {
    pub table: TableId,

    /// Join condition
    pub on: Expr,
}

impl Source {
    pub fn table(table: impl Into<TableId>) -> Self {
        Self {
            table: table.into(),
            joins: vec![],
        }
    }
}

impl From<TableId> for Source {
    fn from(value: TableId) -> Self {
        Self::table(value)
    }
}
