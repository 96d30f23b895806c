use super::*;
use crate::catalog::TableId;
use crate::logical_planner::LogicalTableAccess;

/// A full scan of one table, optionally narrowed to a column subset.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalTableScan {
    pub table_id: TableId,
    pub table_name: String,
    pub columns: Option<Vec<String>>,
}

impl PhysicalPlanner {
    pub(super) fn plan_table_scan(
        &self,
        node: &LogicalTableAccess,
    ) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::TableScan(PhysicalTableScan {
            table_id: node.table_id,
            table_name: node.table_name.clone(),
            columns: node.columns.clone(),
        }))
    }
}
