use async_stream::try_stream;
use futures::stream::Stream;

use super::{BoxedExecutor, ExecutorError};
use crate::storage::Tuple;

/// The executor of a bounded take: drop the first `offset` tuples, then
/// emit at most `limit`.
pub struct LimitExecutor {
    pub offset: usize,
    pub limit: Option<usize>,
    pub child: BoxedExecutor,
}

impl LimitExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            // the number of tuples that have been processed
            let mut processed = 0;
            let mut emitted = 0;
            for await tuple in self.child {
                let tuple = tuple?;
                processed += 1;
                if processed <= self.offset {
                    continue;
                }
                if let Some(limit) = self.limit {
                    if emitted >= limit {
                        break;
                    }
                }
                emitted += 1;
                yield tuple;
            }
        }
    }
}
