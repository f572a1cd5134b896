use super::*;
use crate::schema::TableId;

#[derive(Debug, Clone)]
pub struct Update {
    /// Table to update
    pub table: TableId,

    /// Column assignments
    pub assignments: Assignments,

    /// Which rows to update
    pub filter: Option<Expr>,

    /// Expressions returned for each updated row
    pub returning: Option<Vec<Expr>>,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
