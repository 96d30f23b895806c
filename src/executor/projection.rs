use async_stream::try_stream;
use futures::stream::Stream;

use super::{BoxedExecutor, ExecutorError};
use crate::query::{AggKind, ProjectionItem};
use crate::storage::{Row, Tuple, TupleEntry};

/// The executor of a projection: restricts every entry of the tuple to the
/// selected columns of its table. Aggregate labels resolve to the values
/// the aggregate executor annotated onto the owning table's entry.
pub struct ProjectionExecutor {
    pub items: Vec<ProjectionItem>,
    pub child: BoxedExecutor,
}

impl ProjectionExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            for await tuple in self.child {
                let tuple = tuple?;
                yield project(&self.items, &tuple);
            }
        }
    }
}

fn project(items: &[ProjectionItem], tuple: &Tuple) -> Tuple {
    let entries: Vec<TupleEntry> = tuple
        .entries()
        .iter()
        .map(|entry| {
            let mut row = Row::new(entry.row.id(), Default::default());
            for item in items {
                match item {
                    ProjectionItem::Column(col) if *col.table == *entry.table => {
                        row.set(col.column.clone(), entry.row.get(&col.column).clone());
                    }
                    // a distinct-values item projects the column itself; the
                    // distinct operator above deduplicates
                    ProjectionItem::Aggregate(call) if call.kind == AggKind::Distinct => {
                        if let Some(col) = &call.column {
                            if *col.table == *entry.table {
                                row.set(col.column.clone(), entry.row.get(&col.column).clone());
                            }
                        }
                    }
                    ProjectionItem::Aggregate(call) => {
                        // the aggregate annotates the entry of its column's
                        // table; count(*) lands on the first entry
                        let owner = call
                            .column
                            .as_ref()
                            .map(|c| c.table.as_str())
                            .unwrap_or_else(|| &tuple.entries()[0].table);
                        if owner == &*entry.table {
                            let label = call.label();
                            row.set(label.clone(), entry.row.get(&label).clone());
                        }
                    }
                    ProjectionItem::Column(_) => {}
                }
            }
            TupleEntry {
                table: entry.table.clone(),
                row,
            }
        })
        .collect();
    Tuple::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::executor::block_on;
    use futures::stream::StreamExt;
    use futures::TryStreamExt;

    use super::*;
    use crate::query::ColumnRef;
    use crate::types::DataValue;

    #[test]
    fn keeps_exactly_the_selected_columns() {
        let mut row = Row::new(1, Default::default());
        row.set("a", DataValue::Int64(1));
        row.set("b", DataValue::Int64(2));
        row.set("c", DataValue::Int64(3));
        let child = futures::stream::iter(vec![Ok(Tuple::single(Arc::from("t"), row))]).boxed();

        let executor = ProjectionExecutor {
            items: vec![
                ProjectionItem::Column(ColumnRef::new("t", "a")),
                ProjectionItem::Column(ColumnRef::new("t", "c")),
            ],
            child,
        };
        let tuples: Vec<Tuple> = block_on(executor.execute().try_collect()).unwrap();
        let row = tuples.into_iter().next().unwrap().into_single_row().unwrap();
        let mut keys: Vec<&str> = row.values().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
