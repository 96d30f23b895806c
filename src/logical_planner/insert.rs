use std::sync::Arc;

use super::*;
use crate::query::InsertQuery;

impl LogicalPlanner {
    /// An insert plans to a single leaf node carrying the rows.
    pub fn plan_insert(&self, stmt: &InsertQuery) -> Result<PlanRef, PlanError> {
        let access = self.table_access(&stmt.table)?;
        Ok(Arc::new(LogicalPlan::Insert(LogicalInsert {
            table_id: access.table_id,
            table_name: access.table_name,
            rows: stmt.rows.clone(),
            on_conflict: stmt.on_conflict,
        })))
    }
}
