use super::*;

#[derive(Debug, Clone)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Query(Select),
    Update(Update),
}

impl Statement {
    /// Returns the number of returned elements within the statement (if one
    /// exists).
    pub fn returning_len(&self) -> Option<usize> {
        match self {
            Self::Delete(_) => None,
            Self::Insert(insert) => insert.returning.as_ref().map(Vec::len),
            Self::Query(query) => Some(query.returning.len()),
            Self::Update(update) => update.returning.as_ref().map(Vec::len),
        }
    }
}
