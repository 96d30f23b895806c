use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, ColumnCatalog, ColumnId, TableId};

/// A declared reference from a column to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}

/// The catalog of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCatalog {
    id: TableId,
    name: String,
    /// Mapping from column names to column ids
    column_idxs: HashMap<String, ColumnId>,
    columns: BTreeMap<ColumnId, ColumnCatalog>,
    primary_key: Vec<ColumnId>,
    references: Vec<Reference>,
    next_column_id: ColumnId,
}

impl TableCatalog {
    pub fn new(
        id: TableId,
        name: String,
        columns: Vec<ColumnCatalog>,
        references: Vec<Reference>,
    ) -> Result<TableCatalog, CatalogError> {
        let mut table = TableCatalog {
            id,
            name,
            column_idxs: HashMap::new(),
            columns: BTreeMap::new(),
            primary_key: Vec::new(),
            references,
            next_column_id: 0,
        };
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    fn add_column(&mut self, column: ColumnCatalog) -> Result<ColumnId, CatalogError> {
        if self.column_idxs.contains_key(column.name()) {
            return Err(CatalogError::Duplicated("column", column.name().into()));
        }
        let id = self.next_column_id;
        self.next_column_id += 1;
        let column = ColumnCatalog::new(id, column.name().into(), column.desc().clone());
        if column.is_primary() {
            self.primary_key.push(id);
        }
        self.column_idxs.insert(column.name().into(), id);
        self.columns.insert(id, column);
        Ok(id)
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_idxs.contains_key(name)
    }

    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnCatalog> {
        self.columns.values()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.values().map(|c| c.name().into()).collect()
    }

    pub fn get_column_by_id(&self, id: ColumnId) -> Option<&ColumnCatalog> {
        self.columns.get(&id)
    }

    pub fn get_column_by_name(&self, name: &str) -> Option<&ColumnCatalog> {
        self.column_idxs
            .get(name)
            .and_then(|id| self.columns.get(id))
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnCatalog> {
        self.primary_key.iter().filter_map(|id| self.columns.get(id))
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataTypeExt, DataTypeKind};

    fn column(name: &str) -> ColumnCatalog {
        ColumnCatalog::new(0, name.into(), DataTypeKind::Int.not_null().to_column())
    }

    #[test]
    fn assigns_sequential_column_ids() {
        let table =
            TableCatalog::new(0, "t".into(), vec![column("a"), column("b")], vec![]).unwrap();
        assert_eq!(table.get_column_by_name("a").unwrap().id(), 0);
        assert_eq!(table.get_column_by_name("b").unwrap().id(), 1);
    }

    #[test]
    fn rejects_duplicate_column() {
        let err = TableCatalog::new(0, "t".into(), vec![column("a"), column("a")], vec![]);
        assert_eq!(err, Err(CatalogError::Duplicated("column", "a".into())));
    }
}
