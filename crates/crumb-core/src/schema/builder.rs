use super::{
    Column, ColumnId, ForeignKey, Index, Schema, Table, TableDef, TableId,
};
use crate::{Error, Result};

/// Resolves registered [`TableDef`]s into a verified [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    defs: Vec<TableDef>,
}

impl Builder {
    pub fn register(&mut self, def: TableDef) -> &mut Self {
        self.defs.push(def);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut tables = Vec::with_capacity(self.defs.len());

        // First pass: tables and columns. Ids are assigned in registration
        // order so foreign keys can be resolved in the second pass.
        for (pos, def) in self.defs.iter().enumerate() {
            let table_id = TableId(pos);

            if def.name.is_empty() {
                return Err(Error::invalid_schema("table name must not be empty"));
            }

            if self.defs[..pos].iter().any(|prev| prev.name == def.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table `{}`",
                    def.name
                )));
            }

            let mut columns = Vec::with_capacity(def.columns.len());

            for (index, column) in def.columns.iter().enumerate() {
                if def.columns[..index]
                    .iter()
                    .any(|prev| prev.name == column.name)
                {
                    return Err(Error::invalid_schema(format!(
                        "duplicate column `{}.{}`",
                        def.name, column.name
                    )));
                }

                columns.push(Column {
                    id: ColumnId {
                        table: table_id,
                        index,
                    },
                    name: column.name.to_string(),
                    ty: column.ty,
                    nullable: column.nullable,
                    primary_key: column.primary_key,
                    auto_increment: column.auto_increment,
                });
            }

            match columns.iter().filter(|column| column.primary_key).count() {
                1 => {}
                0 => {
                    return Err(Error::invalid_schema(format!(
                        "table `{}` has no primary key",
                        def.name
                    )))
                }
                _ => {
                    return Err(Error::invalid_schema(format!(
                        "table `{}` has more than one primary key",
                        def.name
                    )))
                }
            }

            tables.push(Table {
                id: table_id,
                name: def.name.to_string(),
                columns,
                indices: vec![],
                foreign_keys: vec![],
            });
        }

        // Second pass: indices and foreign keys, now that every table and
        // column has an id.
        for (pos, def) in self.defs.iter().enumerate() {
            let table_id = TableId(pos);

            for index in &def.indices {
                let columns = index
                    .columns
                    .iter()
                    .map(|name| {
                        tables[pos]
                            .column_by_name(name)
                            .map(|column| column.id)
                            .ok_or_else(|| {
                                Error::invalid_schema(format!(
                                    "index `{}` references unknown column `{}.{}`",
                                    index.name, def.name, name
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;

                tables[pos].indices.push(Index {
                    table: table_id,
                    name: index.name.to_string(),
                    columns,
                    unique: index.unique,
                });
            }

            for fk in &def.foreign_keys {
                let column = tables[pos]
                    .column_by_name(fk.column)
                    .map(|column| column.id)
                    .ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "foreign key references unknown column `{}.{}`",
                            def.name, fk.column
                        ))
                    })?;

                let target_table = tables
                    .iter()
                    .find(|table| table.name == fk.target_table)
                    .ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "foreign key on `{}.{}` references unknown table `{}`",
                            def.name, fk.column, fk.target_table
                        ))
                    })?;

                let target = target_table
                    .column_by_name(fk.target_column)
                    .ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "foreign key on `{}.{}` references unknown column `{}.{}`",
                            def.name, fk.column, fk.target_table, fk.target_column
                        ))
                    })?;

                if target.ty != tables[pos].column(column).ty {
                    return Err(Error::invalid_schema(format!(
                        "foreign key on `{}.{}` has a different type than `{}.{}`",
                        def.name, fk.column, fk.target_table, fk.target_column
                    )));
                }

                let target = target.id;
                tables[pos].foreign_keys.push(ForeignKey {
                    column,
                    target,
                    on_delete: fk.on_delete,
                });
            }
        }

        Ok(Schema { tables })
    }
}
