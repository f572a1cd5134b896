use super::*;

#[derive(Debug, Clone)]
pub struct ExprConcat {
    pub exprs: Vec<Expr>,
}

impl Expr {
    pub fn concat(exprs: Vec<Self>) -> Self {
        ExprConcat { exprs }.into()
    }
}

impl From<ExprConcat> for Expr {
    fn from(value: ExprConcat) -> Self {
        Self::Concat(value)
    }
}
