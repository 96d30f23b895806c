use super::*;
use crate::catalog::TableId;
use crate::logical_planner::LogicalDelete;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalDelete {
    pub table_id: TableId,
    pub table_name: String,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_delete(&self, node: &LogicalDelete) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Delete(PhysicalDelete {
            table_id: node.table_id,
            table_name: node.table_name.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
