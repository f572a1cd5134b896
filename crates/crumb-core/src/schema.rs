mod builder;
pub use builder::Builder;

mod column;
pub use column::{Column, ColumnId};

mod def;
pub use def::{ColumnDef, ForeignKeyDef, IndexDef, TableDef};

mod foreign_key;
pub use foreign_key::{ForeignKey, RefAction};

mod index;
pub use index::Index;

mod table;
pub use table::{Table, TableId};

/// The relational schema all statements are resolved against.
///
/// Built once at startup from registered [`TableDef`]s; immutable afterwards.
#[derive(Debug, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        self.tables.get(id.into().0).expect("invalid table ID")
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        let id = id.into();
        self.table(id.table)
            .columns
            .get(id.index)
            .expect("invalid column ID")
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}
