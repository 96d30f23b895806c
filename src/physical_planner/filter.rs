use super::*;
use crate::logical_planner::LogicalSelect;
use crate::query::Predicate;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalFilter {
    pub predicate: Predicate,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_filter(&self, node: &LogicalSelect) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Filter(PhysicalFilter {
            predicate: node.predicate.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
