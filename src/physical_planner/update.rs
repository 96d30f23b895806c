use super::*;
use crate::catalog::TableId;
use crate::logical_planner::LogicalUpdate;
use crate::query::Assignment;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalUpdate {
    pub table_id: TableId,
    pub table_name: String,
    pub assignments: Vec<Assignment>,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_update(&self, node: &LogicalUpdate) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Update(PhysicalUpdate {
            table_id: node.table_id,
            table_name: node.table_name.clone(),
            assignments: node.assignments.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
