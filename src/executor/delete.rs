use std::sync::Arc;

use async_stream::try_stream;
use futures::stream::Stream;

use super::{affected_tuple, BoxedExecutor, Context, ExecutorError};
use crate::storage::{RowId, Table, Tuple};

/// The executor of a delete: collects the matching row ids and removes
/// them in one call.
pub struct DeleteExecutor {
    pub table: Arc<dyn Table>,
    pub table_name: String,
    pub child: BoxedExecutor,
    pub context: Arc<Context>,
}

impl DeleteExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let mut ids: Vec<RowId> = Vec::new();
            for await tuple in self.child {
                let tuple = tuple?;
                if let Some(row) = tuple.into_single_row() {
                    ids.push(row.id());
                }
            }
            let count = ids.len();
            // an empty remove would clear the whole table; a delete that
            // matched nothing must not touch it
            if count > 0 {
                self.context.check()?;
                self.table.remove(&ids).await?;
            }
            yield affected_tuple(&self.table_name, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::stream::StreamExt;
    use futures::TryStreamExt;

    use super::*;
    use crate::storage::{InMemoryTable, Row};

    #[test]
    fn empty_match_leaves_the_table_intact() {
        let table = InMemoryTable::new();
        block_on(table.put(vec![Row::new(1, Default::default())])).unwrap();

        let executor = DeleteExecutor {
            table: Arc::new(table.clone()),
            table_name: "t".into(),
            child: futures::stream::iter(Vec::<Result<Tuple, ExecutorError>>::new()).boxed(),
            context: Arc::new(Context::new()),
        };
        let _: Vec<Tuple> = block_on(executor.execute().try_collect()).unwrap();
        assert_eq!(block_on(table.row_count()).unwrap(), 1);
    }

    #[test]
    fn removes_matched_ids() {
        let table = InMemoryTable::new();
        block_on(table.put(vec![
            Row::new(1, Default::default()),
            Row::new(2, Default::default()),
        ]))
        .unwrap();

        let child = futures::stream::iter(vec![Ok(Tuple::single(
            Arc::from("t"),
            Row::new(2, Default::default()),
        ))])
        .boxed();
        let executor = DeleteExecutor {
            table: Arc::new(table.clone()),
            table_name: "t".into(),
            child,
            context: Arc::new(Context::new()),
        };
        let _: Vec<Tuple> = block_on(executor.execute().try_collect()).unwrap();
        assert_eq!(block_on(table.row_count()).unwrap(), 1);
        assert!(block_on(table.get(&[2])).unwrap().is_empty());
    }
}
