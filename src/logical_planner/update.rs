use std::sync::Arc;

use super::*;
use crate::query::UpdateQuery;

impl LogicalPlanner {
    /// `Update ← Select(pred) ← TableAccess`; an absent predicate
    /// degenerates to `Update ← TableAccess`.
    pub fn plan_update(&self, stmt: &UpdateQuery) -> Result<PlanRef, PlanError> {
        let access = self.table_access(&stmt.table)?;
        let table_id = access.table_id;
        let table_name = access.table_name.clone();
        let mut child: PlanRef = Arc::new(LogicalPlan::TableAccess(access));
        if let Some(predicate) = &stmt.predicate {
            child = Arc::new(LogicalPlan::Select(LogicalSelect {
                predicate: predicate.clone(),
                child,
            }));
        }
        Ok(Arc::new(LogicalPlan::Update(LogicalUpdate {
            table_id,
            table_name,
            assignments: stmt.assignments.clone(),
            child,
        })))
    }
}
