//! Streaming execution of physical plans.
//!
//! Each operator is a struct whose `execute` method returns a stream of
//! [`Tuple`]s. [`ExecutorBuilder`] walks a physical plan bottom-up and
//! composes the streams. Only storage calls suspend; everything between
//! them is pure and synchronous, and every executor checks the
//! cancellation context before suspending.

use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{Stream, StreamExt};

use crate::catalog::RootCatalogRef;
use crate::physical_planner::PhysicalPlan;
use crate::query::AggCall;
use crate::storage::{InMemoryStorage, Row, RowId, StorageError, Tuple};
use crate::types::{DataTypeKind, DataValue};

pub mod aggregation;
mod context;

mod aggregate;
mod delete;
mod distinct;
mod filter;
mod hash_join;
mod insert;
mod limit;
mod nested_loop_join;
mod order;
mod projection;
mod table_scan;
mod update;

pub use self::aggregate::AggregateExecutor;
pub use self::context::Context;
pub use self::delete::DeleteExecutor;
pub use self::distinct::DistinctExecutor;
pub use self::filter::FilterExecutor;
pub use self::hash_join::HashJoinExecutor;
pub use self::insert::InsertExecutor;
pub use self::limit::LimitExecutor;
pub use self::nested_loop_join::NestedLoopJoinExecutor;
pub use self::order::OrderExecutor;
pub use self::projection::ProjectionExecutor;
pub use self::table_scan::TableScanExecutor;
pub use self::update::UpdateExecutor;

/// The error type of executor operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("duplicate row id {1} in table {0}")]
    DuplicateRow(String, RowId),
    #[error("query cancelled")]
    Cancelled,
}

/// A type-erased executor: a pinned stream of tuples.
pub type BoxedExecutor = Pin<Box<dyn Stream<Item = Result<Tuple, ExecutorError>> + Send>>;

/// The column under which write executors report their affected-row count.
pub(crate) const AFFECTED_ROWS: &str = "affected_rows";

/// The single tuple yielded by a write executor.
pub(crate) fn affected_tuple(table: &str, count: usize) -> Tuple {
    let mut row = Row::synthetic();
    row.set(AFFECTED_ROWS, DataValue::Int64(count as i64));
    Tuple::single(Arc::from(table), row)
}

/// Builds an executor tree from a physical plan.
pub struct ExecutorBuilder {
    storage: Arc<InMemoryStorage>,
    context: Arc<Context>,
}

impl ExecutorBuilder {
    pub fn new(storage: Arc<InMemoryStorage>, context: Arc<Context>) -> ExecutorBuilder {
        ExecutorBuilder { storage, context }
    }

    pub fn build(&self, plan: &PhysicalPlan) -> Result<BoxedExecutor, ExecutorError> {
        Ok(match plan {
            PhysicalPlan::TableScan(scan) => TableScanExecutor {
                table: Arc::new(self.storage.get_table(scan.table_id)?),
                table_name: Arc::from(scan.table_name.as_str()),
                columns: scan.columns.clone(),
                context: self.context.clone(),
            }
            .execute()
            .boxed(),
            PhysicalPlan::Filter(filter) => FilterExecutor {
                predicate: filter.predicate.clone(),
                child: self.build(&filter.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Projection(projection) => ProjectionExecutor {
                items: projection.items.clone(),
                child: self.build(&projection.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::NestedLoopJoin(join) => NestedLoopJoinExecutor {
                condition: join.condition.clone(),
                left: self.build(&join.left)?,
                right: self.build(&join.right)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::HashJoin(join) => HashJoinExecutor {
                left_column: join.left_column.clone(),
                right_column: join.right_column.clone(),
                left: self.build(&join.left)?,
                right: self.build(&join.right)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Order(order) => OrderExecutor {
                orders: order.orders.clone(),
                child: self.build(&order.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Limit(limit) => LimitExecutor {
                offset: limit.offset,
                limit: limit.limit,
                child: self.build(&limit.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Aggregate(aggregate) => AggregateExecutor {
                kinds: aggregate
                    .calls
                    .iter()
                    .map(|call| column_kind(self.storage.catalog(), call))
                    .collect(),
                calls: aggregate.calls.clone(),
                broadcast: aggregate.broadcast,
                child: self.build(&aggregate.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Distinct(distinct) => DistinctExecutor {
                column: distinct.column.clone(),
                child: self.build(&distinct.child)?,
            }
            .execute()
            .boxed(),
            PhysicalPlan::Insert(insert) => InsertExecutor {
                table: Arc::new(self.storage.get_table(insert.table_id)?),
                table_name: insert.table_name.clone(),
                rows: insert.rows.clone(),
                on_conflict: insert.on_conflict,
                context: self.context.clone(),
            }
            .execute()
            .boxed(),
            PhysicalPlan::Update(update) => UpdateExecutor {
                table: Arc::new(self.storage.get_table(update.table_id)?),
                table_name: update.table_name.clone(),
                assignments: update.assignments.clone(),
                child: self.build(&update.child)?,
                context: self.context.clone(),
            }
            .execute()
            .boxed(),
            PhysicalPlan::Delete(delete) => DeleteExecutor {
                table: Arc::new(self.storage.get_table(delete.table_id)?),
                table_name: delete.table_name.clone(),
                child: self.build(&delete.child)?,
                context: self.context.clone(),
            }
            .execute()
            .boxed(),
        })
    }
}

/// The declared kind of an aggregated column, looked up once at build time.
fn column_kind(catalog: &RootCatalogRef, call: &AggCall) -> Option<DataTypeKind> {
    let column = call.column.as_ref()?;
    let table = catalog.get_table_by_name(&column.table)?;
    let desc = table.get_column_by_name(&column.column)?;
    Some(desc.datatype().kind())
}
