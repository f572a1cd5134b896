use crate::{stmt::ValueRecord, Error, Result};

/// The result of a driver operation.
#[derive(Debug)]
pub enum Response {
    /// Number of rows the operation affected
    Count(u64),

    /// Rows returned by the operation
    Rows(Vec<ValueRecord>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self::Count(count)
    }

    pub fn rows(rows: Vec<ValueRecord>) -> Self {
        Self::Rows(rows)
    }

    pub fn into_rows(self) -> Result<Vec<ValueRecord>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            Self::Count(_) => Err(Error::invalid_statement(
                "expected rows, but the statement returned an affected-row count",
            )),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            Self::Rows(_) => Err(Error::invalid_statement(
                "expected an affected-row count, but the statement returned rows",
            )),
        }
    }
}
