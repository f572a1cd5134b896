use super::*;

#[derive(Debug, Clone)]
pub struct ExprFunc {
    pub func: Func,
    pub args: Vec<Expr>,
}

/// Functions the storage engine evaluates server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Number of rows matching the statement
    Count,

    /// RFC 7386 JSON merge-patch of two JSON documents
    JsonPatch,

    /// Lower-case a string
    Lower,
}

impl Expr {
    pub fn count() -> Self {
        ExprFunc {
            func: Func::Count,
            args: vec![],
        }
        .into()
    }

    pub fn json_patch(target: impl Into<Self>, patch: impl Into<Self>) -> Self {
        ExprFunc {
            func: Func::JsonPatch,
            args: vec![target.into(), patch.into()],
        }
        .into()
    }

    pub fn lower(expr: impl Into<Self>) -> Self {
        ExprFunc {
            func: Func::Lower,
            args: vec![expr.into()],
        }
        .into()
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
