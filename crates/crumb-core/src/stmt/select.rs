use super::*;

#[derive(Debug, Clone)]
pub struct Select {
    /// Table (and joins) to select from
    pub source: Source,

    /// Filter applied to the rows
    pub filter: Option<Expr>,

    /// Expressions returned for each matching row
    pub returning: Vec<Expr>,

    /// How to order the results
    pub order_by: Option<OrderBy>,

    /// Maximum number of rows to return
    pub limit: Option<u64>,
}

impl Select {
    pub fn new(source: impl Into<Source>, returning: Vec<Expr>) -> Self {
        Self {
            source: source.into(),
            filter: None,
            returning,
            order_by: None,
            limit: None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Query(value)
    }
}
