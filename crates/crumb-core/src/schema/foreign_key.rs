use super::ColumnId;

/// A foreign-key constraint from one column to another table's column.
#[derive(Debug)]
pub struct ForeignKey {
    /// The referencing column
    pub column: ColumnId,

    /// The referenced column in the target table
    pub target: ColumnId,

    /// What happens to referencing rows when the target row is deleted
    pub on_delete: RefAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefAction {
    /// Delete referencing rows
    Cascade,

    /// Reject the delete while referencing rows exist
    Restrict,

    /// Null out the referencing column
    SetNull,
}

impl RefAction {
    pub fn to_sql_str(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
        }
    }
}
