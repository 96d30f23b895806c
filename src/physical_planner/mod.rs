//! Lowering of logical plans to executable physical plans.
//!
//! Every logical node maps to exactly one physical node and the tree
//! structure is preserved; the planner's work is strategy choice: hash
//! versus nested-loop joins and the fusion of adjacent skip/limit nodes.
//! Planning is pure and touches no storage.

use std::sync::Arc;

mod aggregate;
mod delete;
mod distinct;
mod filter;
mod insert;
mod join;
mod limit;
mod order;
mod projection;
mod table_scan;
mod update;

pub use self::aggregate::PhysicalAggregate;
pub use self::delete::PhysicalDelete;
pub use self::distinct::PhysicalDistinct;
pub use self::filter::PhysicalFilter;
pub use self::insert::PhysicalInsert;
pub use self::join::{PhysicalHashJoin, PhysicalNestedLoopJoin};
pub use self::limit::PhysicalLimit;
pub use self::order::PhysicalOrder;
pub use self::projection::PhysicalProjection;
pub use self::table_scan::PhysicalTableScan;
pub use self::update::PhysicalUpdate;

use crate::logical_planner::{LogicalPlan, PlanError, PlanRef};

pub type PhysicalPlanRef = Arc<PhysicalPlan>;

/// A node of the executable plan tree.
#[derive(Debug, PartialEq, Clone)]
pub enum PhysicalPlan {
    TableScan(PhysicalTableScan),
    Filter(PhysicalFilter),
    Projection(PhysicalProjection),
    NestedLoopJoin(PhysicalNestedLoopJoin),
    HashJoin(PhysicalHashJoin),
    Order(PhysicalOrder),
    Limit(PhysicalLimit),
    Aggregate(PhysicalAggregate),
    Distinct(PhysicalDistinct),
    Insert(PhysicalInsert),
    Update(PhysicalUpdate),
    Delete(PhysicalDelete),
}

impl PhysicalPlan {
    /// The distinct source tables scanned by this plan. Determines the
    /// output shape: one table yields flat rows, several yield composites.
    pub fn source_table_count(&self) -> usize {
        fn collect<'a>(plan: &'a PhysicalPlan, out: &mut Vec<&'a str>) {
            match plan {
                PhysicalPlan::TableScan(scan) => {
                    if !out.contains(&scan.table_name.as_str()) {
                        out.push(&scan.table_name);
                    }
                }
                PhysicalPlan::Filter(n) => collect(&n.child, out),
                PhysicalPlan::Projection(n) => collect(&n.child, out),
                PhysicalPlan::NestedLoopJoin(n) => {
                    collect(&n.left, out);
                    collect(&n.right, out);
                }
                PhysicalPlan::HashJoin(n) => {
                    collect(&n.left, out);
                    collect(&n.right, out);
                }
                PhysicalPlan::Order(n) => collect(&n.child, out),
                PhysicalPlan::Limit(n) => collect(&n.child, out),
                PhysicalPlan::Aggregate(n) => collect(&n.child, out),
                PhysicalPlan::Distinct(n) => collect(&n.child, out),
                PhysicalPlan::Insert(_) => {}
                PhysicalPlan::Update(n) => collect(&n.child, out),
                PhysicalPlan::Delete(n) => collect(&n.child, out),
            }
        }
        let mut tables = Vec::new();
        collect(self, &mut tables);
        tables.len()
    }

    /// Whether executing this plan mutates storage.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Insert(_) | Self::Update(_) | Self::Delete(_)
        )
    }
}

#[derive(Default)]
pub struct PhysicalPlanner;

impl PhysicalPlanner {
    pub fn plan(&self, plan: &PlanRef) -> Result<PhysicalPlan, PlanError> {
        match &**plan {
            LogicalPlan::TableAccess(node) => self.plan_table_scan(node),
            LogicalPlan::Select(node) => self.plan_filter(node),
            LogicalPlan::Project(node) => self.plan_projection(node),
            LogicalPlan::CrossProduct(node) => self.plan_cross_product(node),
            LogicalPlan::Join(node) => self.plan_join(node),
            LogicalPlan::Order(node) => self.plan_order(node),
            LogicalPlan::Skip(node) => self.plan_skip(node),
            LogicalPlan::Limit(node) => self.plan_limit(node),
            LogicalPlan::Aggregate(node) => self.plan_aggregate(node),
            LogicalPlan::Distinct(node) => self.plan_distinct(node),
            LogicalPlan::Insert(node) => self.plan_insert(node),
            LogicalPlan::Update(node) => self.plan_update(node),
            LogicalPlan::Delete(node) => self.plan_delete(node),
        }
    }
}
