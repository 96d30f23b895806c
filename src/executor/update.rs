use std::sync::Arc;

use async_stream::try_stream;
use futures::stream::Stream;

use super::{affected_tuple, BoxedExecutor, Context, ExecutorError};
use crate::query::{AssignValue, Assignment};
use crate::storage::{Table, Tuple};

/// The executor of an update: applies the assignments to a copy of every
/// matching row and puts the copies back in one atomic call.
pub struct UpdateExecutor {
    pub table: Arc<dyn Table>,
    pub table_name: String,
    pub assignments: Vec<Assignment>,
    pub child: BoxedExecutor,
    pub context: Arc<Context>,
}

impl UpdateExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let mut rows = Vec::new();
            for await tuple in self.child {
                let tuple = tuple?;
                let Some(mut row) = tuple.into_single_row() else {
                    continue;
                };
                // assignments apply in order on the copy
                for assignment in &self.assignments {
                    let value = match &assignment.value {
                        AssignValue::Value(value) => value.clone(),
                        AssignValue::Column(source) => row.get(source).clone(),
                    };
                    row.set(assignment.column.clone(), value);
                }
                rows.push(row);
            }
            let count = rows.len();
            if count > 0 {
                self.context.check()?;
                self.table.put(rows).await?;
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
    use crate::types::DataValue;

    #[test]
    fn writes_back_assigned_copies() {
        let table = InMemoryTable::new();
        let mut row = Row::new(1, Default::default());
        row.set("v", DataValue::Int64(10));
        row.set("w", DataValue::Int64(0));
        block_on(table.put(vec![row.clone()])).unwrap();

        let child = futures::stream::iter(vec![Ok(Tuple::single(Arc::from("t"), row))]).boxed();
        let executor = UpdateExecutor {
            table: Arc::new(table.clone()),
            table_name: "t".into(),
            assignments: vec![
                Assignment {
                    column: "v".into(),
                    value: AssignValue::Value(DataValue::Int64(99)),
                },
                // copy of another column reads the already-updated row
                Assignment {
                    column: "w".into(),
                    value: AssignValue::Column("v".into()),
                },
            ],
            child,
            context: Arc::new(Context::new()),
        };
        let _: Vec<Tuple> = block_on(executor.execute().try_collect()).unwrap();

        let got = block_on(table.get(&[1])).unwrap();
        assert_eq!(got[0].get("v"), &DataValue::Int64(99));
        assert_eq!(got[0].get("w"), &DataValue::Int64(99));
    }
}
