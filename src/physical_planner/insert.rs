use super::*;
use crate::catalog::TableId;
use crate::logical_planner::LogicalInsert;
use crate::query::ConflictPolicy;
use crate::storage::Row;

#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalInsert {
    pub table_id: TableId,
    pub table_name: String,
    pub rows: Vec<Row>,
    pub on_conflict: ConflictPolicy,
}

impl PhysicalPlanner {
    pub(super) fn plan_insert(&self, node: &LogicalInsert) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Insert(PhysicalInsert {
            table_id: node.table_id,
            table_name: node.table_name.clone(),
            rows: node.rows.clone(),
            on_conflict: node.on_conflict,
        }))
    }
}
