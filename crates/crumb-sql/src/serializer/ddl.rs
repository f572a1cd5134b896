use super::{Ident, Serializer};
use crumb_core::{
    schema::{Column, Index, Table},
    stmt::Type,
};

use std::fmt::Write;

impl Serializer<'_> {
    pub fn create_table(&self, table: &Table) -> String {
        let mut sql = format!("CREATE TABLE {} (", Ident(&table.name));

        for (i, column) in table.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            self.column_def(&mut sql, column);
        }

        for fk in &table.foreign_keys {
            let column = self.schema.column(fk.column);
            let target = self.schema.column(fk.target);
            let target_table = self.schema.table(fk.target.table);

            write!(
                sql,
                ", FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                Ident(&column.name),
                Ident(&target_table.name),
                Ident(&target.name),
                fk.on_delete.to_sql_str(),
            )
            .unwrap();
        }

        sql.push_str(");");
        sql
    }

    pub fn create_index(&self, index: &Index) -> String {
        let table = self.schema.table(index.table);

        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        write!(sql, "INDEX {} ON {} (", Ident(&index.name), Ident(&table.name)).unwrap();

        for (i, column) in index.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            write!(sql, "{}", Ident(&self.schema.column(*column).name)).unwrap();
        }

        sql.push_str(");");
        sql
    }

    fn column_def(&self, sql: &mut String, column: &Column) {
        write!(sql, "{} {}", Ident(&column.name), ty_to_sql(column.ty)).unwrap();

        if column.primary_key {
            sql.push_str(" PRIMARY KEY");
            if column.auto_increment {
                sql.push_str(" AUTOINCREMENT");
            }
        } else if !column.nullable {
            sql.push_str(" NOT NULL");
        }
    }
}

fn ty_to_sql(ty: Type) -> &'static str {
    match ty {
        Type::Bool | Type::I64 => "INTEGER",
        Type::Json | Type::Text => "TEXT",
    }
}
