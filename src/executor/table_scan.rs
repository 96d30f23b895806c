use std::sync::Arc;

use async_stream::try_stream;
use futures::stream::Stream;

use super::{Context, ExecutorError};
use crate::storage::{Table, Tuple};

/// The executor of a table scan: every row currently stored, each wrapped
/// as a single-entry tuple keyed by the table name.
pub struct TableScanExecutor {
    pub table: Arc<dyn Table>,
    pub table_name: Arc<str>,
    /// Columns to keep, narrowed by projection push-down. `None` keeps all.
    pub columns: Option<Vec<String>>,
    pub context: Arc<Context>,
}

impl TableScanExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            self.context.check()?;
            // snapshot before yielding anything
            let rows = self.table.get(&[]).await?;
            for row in rows {
                let row = match &self.columns {
                    Some(columns) => row.restrict(columns.iter().map(String::as_str)),
                    None => row,
                };
                yield Tuple::single(self.table_name.clone(), row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::TryStreamExt;

    use super::*;
    use crate::storage::{InMemoryTable, Row};
    use crate::types::DataValue;

    #[test]
    fn scan_wraps_rows_by_table_name() {
        let table = InMemoryTable::new();
        let mut row = Row::new(1, Default::default());
        row.set("v", DataValue::Int64(7));
        block_on(table.put(vec![row])).unwrap();

        let scan = TableScanExecutor {
            table: Arc::new(table),
            table_name: Arc::from("t"),
            columns: None,
            context: Arc::new(Context::new()),
        };
        let tuples: Vec<Tuple> = block_on(scan.execute().try_collect()).unwrap();
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].value("t", "v"), &DataValue::Int64(7));
    }

    #[test]
    fn cancelled_scan_yields_nothing() {
        let context = Arc::new(Context::new());
        context.cancel();
        let scan = TableScanExecutor {
            table: Arc::new(InMemoryTable::new()),
            table_name: Arc::from("t"),
            columns: None,
            context,
        };
        let result: Result<Vec<Tuple>, _> = block_on(scan.execute().try_collect());
        assert_eq!(result, Err(ExecutorError::Cancelled));
    }
}
