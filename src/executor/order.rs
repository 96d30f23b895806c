use std::cmp::Ordering;

use async_stream::try_stream;
use futures::stream::Stream;
use futures::TryStreamExt;

use super::{BoxedExecutor, ExecutorError};
use crate::query::{Order, OrderPair};
use crate::storage::Tuple;

/// The executor of an order operation: a full buffer and one stable sort
/// under a single lexicographic comparator, so ties on earlier keys keep
/// their input order. Null sorts before any value in ascending order.
pub struct OrderExecutor {
    pub orders: Vec<OrderPair>,
    pub child: BoxedExecutor,
}

impl OrderExecutor {
    pub fn execute(self) -> impl Stream<Item = Result<Tuple, ExecutorError>> {
        try_stream! {
            let mut tuples: Vec<Tuple> = self.child.try_collect().await?;
            let orders = self.orders;
            tuples.sort_by(|a, b| cmp_by(a, b, &orders));
            for tuple in tuples {
                yield tuple;
            }
        }
    }
}

/// Compare two tuples by the order keys.
fn cmp_by(a: &Tuple, b: &Tuple, orders: &[OrderPair]) -> Ordering {
    for pair in orders {
        let va = a.value(&pair.column.table, &pair.column.column);
        let vb = b.value(&pair.column.table, &pair.column.column);
        match va.cmp(vb) {
            Ordering::Equal => continue,
            ordering if pair.order == Order::Desc => return ordering.reverse(),
            ordering => return ordering,
        }
    }
    Ordering::Equal
}
