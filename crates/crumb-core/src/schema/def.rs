use super::RefAction;
use crate::stmt::Type;

/// Declarative description of a table, registered at startup.
///
/// Defs carry names rather than resolved ids; [`super::Builder`] turns the
/// registered defs into an indexed, verified [`super::Schema`].
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub indices: Vec<IndexDef>,
    pub foreign_keys: Vec<ForeignKeyDef>,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: Type,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

#[derive(Debug, Clone)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: Vec<&'static str>,
    pub unique: bool,
}

#[derive(Debug, Clone)]
pub struct ForeignKeyDef {
    /// The referencing column in this table
    pub column: &'static str,

    /// The referenced table
    pub target_table: &'static str,

    /// The referenced column in the target table
    pub target_column: &'static str,

    pub on_delete: RefAction,
}

impl TableDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            columns: vec![],
            indices: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: IndexDef) -> Self {
        self.indices.push(index);
        self
    }

    pub fn foreign_key(mut self, foreign_key: ForeignKeyDef) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }
}

impl ColumnDef {
    /// An auto-assigned integer surrogate-key column.
    pub fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::I64,
            nullable: false,
            primary_key: true,
            auto_increment: true,
        }
    }

    pub fn i64(name: &'static str) -> Self {
        Self::plain(name, Type::I64)
    }

    pub fn text(name: &'static str) -> Self {
        Self::plain(name, Type::Text)
    }

    pub fn json(name: &'static str) -> Self {
        Self::plain(name, Type::Json)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn plain(name: &'static str, ty: Type) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            primary_key: false,
            auto_increment: false,
        }
    }
}

impl IndexDef {
    pub fn new(name: &'static str, columns: Vec<&'static str>) -> Self {
        Self {
            name,
            columns,
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

impl ForeignKeyDef {
    pub fn new(
        column: &'static str,
        target_table: &'static str,
        target_column: &'static str,
    ) -> Self {
        Self {
            column,
            target_table,
            target_column,
            on_delete: RefAction::Restrict,
        }
    }

    pub fn on_delete(mut self, action: RefAction) -> Self {
        self.on_delete = action;
        self
    }
}
