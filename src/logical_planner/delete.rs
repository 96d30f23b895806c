use std::sync::Arc;

use super::*;
use crate::query::DeleteQuery;

impl LogicalPlanner {
    /// Symmetric to update: `Delete ← Select(pred) ← TableAccess`.
    pub fn plan_delete(&self, stmt: &DeleteQuery) -> Result<PlanRef, PlanError> {
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
        Ok(Arc::new(LogicalPlan::Delete(LogicalDelete {
            table_id,
            table_name,
            child,
        })))
    }
}
