use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use super::{Row, RowId, StorageError, StorageResult, Table};
use crate::catalog::{ColumnCatalog, Reference, RootCatalog, RootCatalogRef, TableId};

/// In-memory storage: a catalog plus one [`InMemoryTable`] per registered
/// table.
pub struct InMemoryStorage {
    catalog: RootCatalogRef,
    tables: Mutex<HashMap<TableId, InMemoryTable>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            catalog: Arc::new(RootCatalog::new()),
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &RootCatalogRef {
        &self.catalog
    }

    /// Registers a table in the catalog and creates its empty backing store.
    pub fn create_table(
        &self,
        name: &str,
        columns: Vec<ColumnCatalog>,
        references: Vec<Reference>,
    ) -> StorageResult<TableId> {
        if self.catalog.get_table_by_name(name).is_some() {
            return Err(StorageError::Duplicated("table", name.into()));
        }
        let id = self
            .catalog
            .add_table(name, columns, references)
            .map_err(|_| StorageError::Duplicated("table", name.into()))?;
        self.tables.lock().unwrap().insert(id, InMemoryTable::new());
        Ok(id)
    }

    pub fn get_table(&self, id: TableId) -> StorageResult<InMemoryTable> {
        self.tables
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound("table", id.to_string()))
    }

    pub fn drop_table(&self, id: TableId) -> StorageResult<()> {
        self.tables
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| StorageError::NotFound("table", id.to_string()))?;
        self.catalog
            .drop_table(id)
            .map_err(|_| StorageError::NotFound("table", id.to_string()))?;
        Ok(())
    }
}

/// A table in the in-memory engine. This struct can be freely cloned, as it
/// only serves as a handle to the shared row map.
#[derive(Clone, Default)]
pub struct InMemoryTable {
    inner: Arc<RwLock<BTreeMap<RowId, Row>>>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Table for InMemoryTable {
    async fn get(&self, ids: &[RowId]) -> StorageResult<Vec<Row>> {
        let inner = self.inner.read().unwrap();
        if ids.is_empty() {
            return Ok(inner.values().cloned().collect());
        }
        Ok(ids.iter().filter_map(|id| inner.get(id).cloned()).collect())
    }

    async fn put(&self, rows: Vec<Row>) -> StorageResult<()> {
        let mut inner = self.inner.write().unwrap();
        for row in rows {
            inner.insert(row.id(), row);
        }
        Ok(())
    }

    async fn remove(&self, ids: &[RowId]) -> StorageResult<()> {
        let mut inner = self.inner.write().unwrap();
        // an empty id list, or one covering every row, clears the table
        if ids.is_empty() || ids.len() == inner.len() {
            inner.clear();
            return Ok(());
        }
        for id in ids {
            inner.remove(id);
        }
        Ok(())
    }

    async fn row_count(&self) -> StorageResult<usize> {
        Ok(self.inner.read().unwrap().len())
    }
}
