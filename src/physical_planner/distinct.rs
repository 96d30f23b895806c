use super::*;
use crate::logical_planner::LogicalDistinct;
use crate::query::ColumnRef;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalDistinct {
    pub column: ColumnRef,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_distinct(&self, node: &LogicalDistinct) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Distinct(PhysicalDistinct {
            column: node.column.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
