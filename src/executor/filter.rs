use async_stream::try_stream;
use futures::stream::Stream;

use super::{BoxedExecutor, ExecutorError};
use crate::query::Predicate;
use crate::storage::Tuple;

/// The executor of a filter operation.
pub struct FilterExecutor {
    pub predicate: Predicate,
    pub child: BoxedExecutor,
}

impl FilterExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            for await tuple in self.child {
                let tuple = tuple?;
                if self.predicate.evaluate(&tuple) {
                    yield tuple;
                }
            }
        }
    }
}
