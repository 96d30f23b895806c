use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::DataValue;

/// The identity of a row, unique within its table.
pub type RowId = u64;

/// The unit of storage: an integer identity plus a payload addressable by
/// column name. A missing column reads as [`DataValue::Null`], the explicit
/// absent marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    values: HashMap<String, DataValue>,
}

impl Row {
    pub fn new(id: RowId, values: HashMap<String, DataValue>) -> Row {
        Row { id, values }
    }

    /// A row that exists only inside a running query, never in a table.
    pub(crate) fn synthetic() -> Row {
        Row {
            id: 0,
            values: HashMap::new(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn get(&self, column: &str) -> &DataValue {
        self.values.get(column).unwrap_or(&DataValue::Null)
    }

    pub fn set(&mut self, column: impl Into<String>, value: DataValue) {
        self.values.insert(column.into(), value);
    }

    pub fn values(&self) -> &HashMap<String, DataValue> {
        &self.values
    }

    pub fn into_values(self) -> HashMap<String, DataValue> {
        self.values
    }

    /// A copy of this row keeping only the given columns.
    pub fn restrict<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Row {
        let values = columns
            .into_iter()
            .map(|name| (name.to_string(), self.get(name).clone()))
            .collect();
        Row {
            id: self.id,
            values,
        }
    }
}

/// One entry of a composite row: the rows of a single source table.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleEntry {
    pub table: Arc<str>,
    pub row: Row,
}

/// The composite row flowing between physical operators, carrying one entry
/// per source table in scope. Single-table pipelines carry exactly one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tuple {
    entries: SmallVec<[TupleEntry; 2]>,
}

impl Tuple {
    pub fn from_entries(entries: impl IntoIterator<Item = TupleEntry>) -> Tuple {
        Tuple {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn single(table: Arc<str>, row: Row) -> Tuple {
        let mut entries = SmallVec::new();
        entries.push(TupleEntry { table, row });
        Tuple { entries }
    }

    /// Concatenates the entries of two tuples (join output).
    pub fn merge(mut self, other: Tuple) -> Tuple {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[TupleEntry] {
        &self.entries
    }

    pub fn entry(&self, table: &str) -> Option<&Row> {
        self.entries
            .iter()
            .find(|e| &*e.table == table)
            .map(|e| &e.row)
    }

    pub fn entry_mut(&mut self, table: &str) -> Option<&mut Row> {
        self.entries
            .iter_mut()
            .find(|e| &*e.table == table)
            .map(|e| &mut e.row)
    }

    /// Resolves a qualified column against this tuple. Unknown tables and
    /// columns read as null.
    pub fn value(&self, table: &str, column: &str) -> &DataValue {
        match self.entry(table) {
            Some(row) => row.get(column),
            None => &DataValue::Null,
        }
    }

    /// The storage row of the only entry. Write pipelines are single-table.
    pub fn into_single_row(mut self) -> Option<Row> {
        match self.entries.len() {
            1 => Some(self.entries.remove(0).row),
            _ => None,
        }
    }
}
