use std::sync::Arc;

use async_stream::try_stream;
use futures::stream::Stream;

use super::{affected_tuple, Context, ExecutorError};
use crate::query::ConflictPolicy;
use crate::storage::{Row, RowId, Table, Tuple};

/// The executor of an insert.
///
/// Under the error policy any colliding row id fails the query before
/// anything is written; under the replace policy collisions overwrite.
/// The write itself is one atomic `put`.
pub struct InsertExecutor {
    pub table: Arc<dyn Table>,
    pub table_name: String,
    pub rows: Vec<Row>,
    pub on_conflict: ConflictPolicy,
    pub context: Arc<Context>,
}

impl InsertExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let count = self.rows.len();
            if count > 0 {
                if self.on_conflict == ConflictPolicy::Error {
                    self.context.check()?;
                    let ids: Vec<RowId> = self.rows.iter().map(Row::id).collect();
                    let existing = self.table.get(&ids).await?;
                    check_conflict(&self.table_name, &existing)?;
                }
                self.context.check()?;
                self.table.put(self.rows).await?;
            }
            yield affected_tuple(&self.table_name, count);
        }
    }
}

fn check_conflict(table_name: &str, existing: &[Row]) -> Result<(), ExecutorError> {
    match existing.first() {
        Some(row) => Err(ExecutorError::DuplicateRow(table_name.into(), row.id())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::TryStreamExt;

    use super::*;
    use crate::storage::InMemoryTable;
    use crate::types::DataValue;

    fn row(id: RowId, v: i64) -> Row {
        let mut row = Row::new(id, Default::default());
        row.set("v", DataValue::Int64(v));
        row
    }

    fn insert(
        table: &InMemoryTable,
        rows: Vec<Row>,
        policy: ConflictPolicy,
    ) -> Result<Vec<Tuple>, ExecutorError> {
        let executor = InsertExecutor {
            table: Arc::new(table.clone()),
            table_name: "t".into(),
            rows,
            on_conflict: policy,
            context: Arc::new(Context::new()),
        };
        block_on(executor.execute().try_collect())
    }

    #[test]
    fn simple() {
        let table = InMemoryTable::new();
        insert(&table, vec![row(1, 10), row(2, 20)], ConflictPolicy::Error).unwrap();
        assert_eq!(block_on(table.row_count()).unwrap(), 2);
    }

    #[test]
    fn error_policy_rejects_collision() {
        let table = InMemoryTable::new();
        insert(&table, vec![row(1, 10)], ConflictPolicy::Error).unwrap();
        let err = insert(&table, vec![row(1, 99)], ConflictPolicy::Error).unwrap_err();
        assert_eq!(err, ExecutorError::DuplicateRow("t".into(), 1));
        // nothing was overwritten
        let got = block_on(table.get(&[1])).unwrap();
        assert_eq!(got[0].get("v"), &DataValue::Int64(10));
    }

    #[test]
    fn replace_policy_overwrites() {
        let table = InMemoryTable::new();
        insert(&table, vec![row(1, 10)], ConflictPolicy::Error).unwrap();
        insert(&table, vec![row(1, 99)], ConflictPolicy::Replace).unwrap();
        let got = block_on(table.get(&[1])).unwrap();
        assert_eq!(got[0].get("v"), &DataValue::Int64(99));
    }
}
