use std::collections::HashSet;

use async_stream::try_stream;
use futures::stream::Stream;

use super::{BoxedExecutor, ExecutorError};
use crate::query::ColumnRef;
use crate::storage::Tuple;

/// The executor of distinct projection: one output tuple per distinct value
/// of the column, in input order of first occurrence.
pub struct DistinctExecutor {
    pub column: ColumnRef,
    pub child: BoxedExecutor,
}

impl DistinctExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let mut seen = HashSet::new();
            for await tuple in self.child {
                let tuple = tuple?;
                let value = tuple.value(&self.column.table, &self.column.column).clone();
                if seen.insert(value) {
                    yield tuple;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::executor::block_on;
    use futures::stream::StreamExt;
    use futures::TryStreamExt;

    use super::*;
    use crate::storage::Row;
    use crate::types::DataValue;

    #[test]
    fn first_occurrence_order() {
        let table: Arc<str> = Arc::from("t");
        let child = futures::stream::iter(
            [3, 1, 3, 2, 1]
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let mut row = Row::new(i as u64, Default::default());
                    row.set("v", DataValue::Int64(*v));
                    Ok(Tuple::single(table.clone(), row))
                })
                .collect::<Vec<_>>(),
        )
        .boxed();

        let executor = DistinctExecutor {
            column: ColumnRef::new("t", "v"),
            child,
        };
        let tuples: Vec<Tuple> = block_on(executor.execute().try_collect()).unwrap();
        let values: Vec<i64> = tuples
            .iter()
            .map(|t| t.value("t", "v").as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![3, 1, 2]);
    }
}
