use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalog::{
    CatalogError, ColumnCatalog, Reference, TableCatalog, TableCatalogRef, TableId,
};

/// The root of the catalog: the registry of all tables.
///
/// Table metadata is read-only once registered; registration itself is
/// guarded so that the catalog can be shared behind an `Arc`.
#[derive(Default)]
pub struct RootCatalog {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    table_idxs: HashMap<String, TableId>,
    tables: HashMap<TableId, TableCatalogRef>,
    next_table_id: TableId,
}

impl RootCatalog {
    pub fn new() -> RootCatalog {
        RootCatalog::default()
    }

    pub fn add_table(
        &self,
        name: &str,
        columns: Vec<ColumnCatalog>,
        references: Vec<Reference>,
    ) -> Result<TableId, CatalogError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.table_idxs.contains_key(name) {
            return Err(CatalogError::Duplicated("table", name.into()));
        }
        let id = inner.next_table_id;
        inner.next_table_id += 1;
        let table = TableCatalog::new(id, name.into(), columns, references)?;
        inner.table_idxs.insert(name.into(), id);
        inner.tables.insert(id, table.into());
        Ok(id)
    }

    pub fn drop_table(&self, id: TableId) -> Result<(), CatalogError> {
        let mut inner = self.inner.lock().unwrap();
        let table = inner
            .tables
            .remove(&id)
            .ok_or_else(|| CatalogError::NotFound("table", id.to_string()))?;
        inner.table_idxs.remove(table.name());
        Ok(())
    }

    pub fn get_table_by_id(&self, id: TableId) -> Option<TableCatalogRef> {
        self.inner.lock().unwrap().tables.get(&id).cloned()
    }

    pub fn get_table_by_name(&self, name: &str) -> Option<TableCatalogRef> {
        let inner = self.inner.lock().unwrap();
        let id = inner.table_idxs.get(name)?;
        inner.tables.get(id).cloned()
    }

    pub fn all_tables(&self) -> Vec<TableCatalogRef> {
        self.inner.lock().unwrap().tables.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataTypeExt, DataTypeKind};

    #[test]
    fn lookup_by_name_and_id() {
        let catalog = RootCatalog::new();
        let columns = vec![ColumnCatalog::new(
            0,
            "id".into(),
            DataTypeKind::String.not_null().to_column_primary_key(),
        )];
        let id = catalog.add_table("jobs", columns, vec![]).unwrap();
        assert_eq!(catalog.get_table_by_id(id).unwrap().name(), "jobs");
        assert_eq!(catalog.get_table_by_name("jobs").unwrap().id(), id);
        assert!(catalog.get_table_by_name("missing").is_none());
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let catalog = RootCatalog::new();
        catalog.add_table("t", vec![], vec![]).unwrap();
        assert!(catalog.add_table("t", vec![], vec![]).is_err());
    }
}
