use async_stream::try_stream;
use futures::stream::Stream;
use futures::TryStreamExt;

use super::{BoxedExecutor, ExecutorError};
use crate::query::Predicate;
use crate::storage::Tuple;

/// The executor of a cross product, and the fallback join for conditions a
/// hash join cannot key on. The right side is materialised once and
/// replayed per left tuple.
pub struct NestedLoopJoinExecutor {
    pub condition: Option<Predicate>,
    pub left: BoxedExecutor,
    pub right: BoxedExecutor,
}

impl NestedLoopJoinExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let right_tuples: Vec<Tuple> = self.right.try_collect().await?;
            for await left in self.left {
                let left = left?;
                for right in &right_tuples {
                    let merged = left.clone().merge(right.clone());
                    let keep = match &self.condition {
                        Some(condition) => condition.evaluate(&merged),
                        None => true,
                    };
                    if keep {
                        yield merged;
                    }
                }
            }
        }
    }
}
