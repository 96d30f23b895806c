use super::*;
use crate::logical_planner::LogicalAggregate;
use crate::query::AggCall;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalAggregate {
    pub calls: Vec<AggCall>,
    pub broadcast: bool,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_aggregate(&self, node: &LogicalAggregate) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Aggregate(PhysicalAggregate {
            calls: node.calls.clone(),
            broadcast: node.broadcast,
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
