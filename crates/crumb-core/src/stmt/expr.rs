use super::*;
use crate::schema::ColumnId;

/// A scalar-valued expression appearing in filters, assignments, and
/// returning clauses.
#[derive(Debug, Clone)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// References a column in a table
    Column(ExprColumn),

    /// Concatenate strings
    Concat(ExprConcat),

    /// A function call
    Func(ExprFunc),

    /// Tests if the string expression matches a pattern
    Like(ExprLike),

    /// A literal value, bound as a statement parameter
    Value(Value),
}

impl Expr {
    pub fn column(column: impl Into<ColumnId>) -> Self {
        ExprColumn {
            column: column.into(),
        }
        .into()
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn eq(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op: BinaryOp::Eq,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    /// Case-insensitive substring match, evaluated server-side.
    pub fn contains_ignore_case(expr: impl Into<Self>, needle: impl Into<Value>) -> Self {
        Self::like(
            Self::lower(expr),
            Self::concat(vec![
                Self::value("%"),
                Self::lower(Self::Value(needle.into())),
                Self::value("%"),
            ]),
        )
    }

    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<&String> for Expr {
    fn from(value: &String) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
