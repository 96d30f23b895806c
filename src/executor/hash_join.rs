use std::collections::HashMap;

use async_stream::try_stream;
use futures::stream::Stream;
use futures::TryStreamExt;

use super::{BoxedExecutor, ExecutorError};
use crate::query::ColumnRef;
use crate::storage::Tuple;
use crate::types::DataValue;

/// The executor for hash join.
///
/// The left input is built into the hash table and the right input probes
/// it. Null join keys never match on either side.
pub struct HashJoinExecutor {
    pub left_column: ColumnRef,
    pub right_column: ColumnRef,
    pub left: BoxedExecutor,
    pub right: BoxedExecutor,
}

impl HashJoinExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            // build
            let left_tuples: Vec<Tuple> = self.left.try_collect().await?;
            let mut hash_map: HashMap<DataValue, Vec<Tuple>> = HashMap::new();
            for tuple in left_tuples {
                let key = tuple.value(&self.left_column.table, &self.left_column.column);
                if key.is_null() {
                    continue;
                }
                hash_map.entry(key.clone()).or_default().push(tuple);
            }

            // probe
            for await right in self.right {
                let right = right?;
                let key = right.value(&self.right_column.table, &self.right_column.column);
                if key.is_null() {
                    continue;
                }
                for left in hash_map.get(key).unwrap_or(&vec![]) {
                    yield left.clone().merge(right.clone());
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

    use super::*;
    use crate::storage::Row;

    fn side(table: &str, keys: &[DataValue]) -> BoxedExecutor {
        let table: Arc<str> = Arc::from(table);
        futures::stream::iter(
            keys.iter()
                .enumerate()
                .map(|(i, key)| {
                    let mut row = Row::new(i as u64, Default::default());
                    row.set("k", key.clone());
                    Ok(Tuple::single(table.clone(), row))
                })
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    fn run(left: &[DataValue], right: &[DataValue]) -> Vec<Tuple> {
        let executor = HashJoinExecutor {
            left_column: ColumnRef::new("a", "k"),
            right_column: ColumnRef::new("b", "k"),
            left: side("a", left),
            right: side("b", right),
        };
        block_on(executor.execute().try_collect()).unwrap()
    }

    #[test]
    fn matches_equal_keys() {
        let ones = [DataValue::Int64(1), DataValue::Int64(2)];
        let twos = [DataValue::Int64(2), DataValue::Int64(3)];
        let tuples = run(&ones, &twos);
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].value("a", "k"), &DataValue::Int64(2));
        assert_eq!(tuples[0].value("b", "k"), &DataValue::Int64(2));
    }

    #[test]
    fn null_keys_never_match() {
        let with_null = [DataValue::Null, DataValue::Int64(1)];
        let tuples = run(&with_null, &with_null);
        assert_eq!(tuples.len(), 1);
    }
}
