use std::sync::Arc;

use async_stream::try_stream;
use futures::stream::Stream;
use futures::TryStreamExt;

use super::aggregation::{create_state, AggregationState};
use super::{BoxedExecutor, ExecutorError};
use crate::query::AggCall;
use crate::storage::{Row, Tuple};
use crate::types::{DataTypeKind, DataValue};

/// The executor of aggregation.
///
/// Every call is computed over the entire input. A pure-aggregate query
/// collapses to one synthesized row of labelled scalars; a query mixing
/// plain columns with aggregates instead re-emits every input tuple with
/// the scalars annotated onto it (the broadcast behaviour — deliberately
/// not SQL's GROUP BY).
pub struct AggregateExecutor {
    pub calls: Vec<AggCall>,
    /// Declared kinds of the aggregated columns, aligned with `calls`.
    pub kinds: Vec<Option<DataTypeKind>>,
    pub broadcast: bool,
    pub child: BoxedExecutor,
}

impl AggregateExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let tuples: Vec<Tuple> = self.child.try_collect().await?;

            let mut states: Vec<Box<dyn AggregationState>> = self
                .calls
                .iter()
                .zip(&self.kinds)
                .map(|(call, kind)| create_state(call, *kind))
                .collect();
            for tuple in &tuples {
                for (call, state) in self.calls.iter().zip(states.iter_mut()) {
                    let value = match &call.column {
                        Some(col) => tuple.value(&col.table, &col.column).clone(),
                        // count(*) counts rows: feed a non-null constant
                        None => DataValue::Int64(1),
                    };
                    state.update(&value)?;
                }
            }
            let results: Vec<DataValue> = states.iter().map(|state| state.output()).collect();

            if self.broadcast {
                for mut tuple in tuples {
                    for (call, value) in self.calls.iter().zip(&results) {
                        let owner = match &call.column {
                            Some(col) => col.table.clone(),
                            None => tuple.entries()[0].table.to_string(),
                        };
                        if let Some(row) = tuple.entry_mut(&owner) {
                            row.set(call.label(), value.clone());
                        }
                    }
                    yield tuple;
                }
            } else {
                let table: Arc<str> = match tuples.first() {
                    Some(tuple) => tuple.entries()[0].table.clone(),
                    None => self
                        .calls
                        .iter()
                        .find_map(|call| call.column.as_ref())
                        .map(|col| Arc::from(col.table.as_str()))
                        .unwrap_or_else(|| Arc::from("")),
                };
                let mut row = Row::synthetic();
                for (call, value) in self.calls.iter().zip(results) {
                    row.set(call.label(), value);
                }
                yield Tuple::single(table, row);
            }
        }
    }
}
