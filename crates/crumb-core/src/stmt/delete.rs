use super::*;
use crate::schema::TableId;

#[derive(Debug, Clone)]
pub struct Delete {
    /// Table to delete from
    pub table: TableId,

    /// Which rows to delete
    pub filter: Option<Expr>,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
