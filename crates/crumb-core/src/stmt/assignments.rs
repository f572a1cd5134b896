use super::Expr;
use crate::schema::ColumnId;

/// The SET clause of an update statement.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    pub items: Vec<Assignment>,
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: ColumnId,
    pub expr: Expr,
}

impl Assignments {
    pub fn set(&mut self, column: impl Into<ColumnId>, expr: impl Into<Expr>) {
        self.items.push(Assignment {
            column: column.into(),
            expr: expr.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
