use super::*;
use crate::logical_planner::LogicalOrder;
use crate::query::OrderPair;

/// A full in-memory sort. The memory store never produces pre-ordered
/// scans, so ordering always materialises and sorts its input.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalOrder {
    pub orders: Vec<OrderPair>,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_order(&self, node: &LogicalOrder) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Order(PhysicalOrder {
            orders: node.orders.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
