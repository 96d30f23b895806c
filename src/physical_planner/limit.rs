use super::*;
use crate::logical_planner::{LogicalLimit, LogicalSkip};

/// Bounded take: drop `offset` rows, then emit at most `limit`.
/// Adjacent logical limit/skip nodes fuse into one of these.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalLimit {
    pub offset: usize,
    pub limit: Option<usize>,
    pub child: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_limit(&self, node: &LogicalLimit) -> Result<PhysicalPlan, PlanError> {
        // `Limit ← Skip` collapses into a single bounded take
        if let crate::logical_planner::LogicalPlan::Skip(skip) = &*node.child {
            return Ok(PhysicalPlan::Limit(PhysicalLimit {
                offset: skip.count,
                limit: Some(node.count),
                child: Arc::new(self.plan(&skip.child)?),
            }));
        }
        Ok(PhysicalPlan::Limit(PhysicalLimit {
            offset: 0,
            limit: Some(node.count),
            child: Arc::new(self.plan(&node.child)?),
        }))
    }

    pub(super) fn plan_skip(&self, node: &LogicalSkip) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::Limit(PhysicalLimit {
            offset: node.count,
            limit: None,
            child: Arc::new(self.plan(&node.child)?),
        }))
    }
}
