use super::*;
use crate::logical_planner::LogicalProject;
use crate::query::ProjectionItem;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalProjection {
    pub items: Vec<ProjectionItem>,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_projection(&self, node: &LogicalProject) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Projection(PhysicalProjection {
            items: node.items.clone(),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
