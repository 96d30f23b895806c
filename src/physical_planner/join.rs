use super::*;
use crate::logical_planner::{LogicalCrossProduct, LogicalJoin};
use crate::query::{ColumnRef, Predicate};

/// Cross product, or an inner join under an arbitrary condition.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalNestedLoopJoin {
    pub condition: Option<Predicate>,
    pub left: PhysicalPlanRef,
    pub right: PhysicalPlanRef,
}

/// Equi-join. The left side is built into the hash table; with no indexes
/// and no cardinality statistics there is nothing better to key the choice
/// on, so the build side is fixed.
#[derive(Debug, PartialEq, Clone)]
pub struct PhysicalHashJoin {
    pub left_column: ColumnRef,
    pub right_column: ColumnRef,
    pub left: PhysicalPlanRef,
    pub right: PhysicalPlanRef,
}

impl PhysicalPlanner {
    pub(super) fn plan_cross_product(
        &self,
        node: &LogicalCrossProduct,
    ) -> Result<PhysicalPlan, PlanError> {
        Ok(PhysicalPlan::NestedLoopJoin(PhysicalNestedLoopJoin {
            condition: None,
            left: Arc::new(self.plan(&node.left)?),
            right: Arc::new(self.plan(&node.right)?),
        }))
    }

    pub(super) fn plan_join(&self, node: &LogicalJoin) -> Result<PhysicalPlan, PlanError> {
        let left = Arc::new(self.plan(&node.left)?);
        let right = Arc::new(self.plan(&node.right)?);

        if let Some((a, b)) = node.condition.as_equi_join() {
            // orient the key columns to their subtrees
            let left_tables = node.left.source_tables();
            let right_tables = node.right.source_tables();
            let oriented = if left_tables.contains(&a.table) && right_tables.contains(&b.table) {
                Some((a.clone(), b.clone()))
            } else if left_tables.contains(&b.table) && right_tables.contains(&a.table) {
                Some((b.clone(), a.clone()))
            } else {
                None
            };
            if let Some((left_column, right_column)) = oriented {
                return Ok(PhysicalPlan::HashJoin(PhysicalHashJoin {
                    left_column,
                    right_column,
                    left,
                    right,
                }));
            }
        }

        Ok(PhysicalPlan::NestedLoopJoin(PhysicalNestedLoopJoin {
            condition: Some(node.condition.clone()),
            left,
            right,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::Optimizer;
    use crate::query::{CompareOp, QueryDescription, SelectQuery};

    fn physical(query: SelectQuery) -> PhysicalPlan {
        let logical = crate::optimizer::test_util::plan(QueryDescription::Select(query));
        let optimized = Optimizer.optimize(logical);
        PhysicalPlanner.plan(&optimized).unwrap()
    }

    #[test]
    fn equi_join_lowers_to_hash_join() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::eq(
                ColumnRef::new("b", "x"),
                ColumnRef::new("a", "x"),
            )),
            ..Default::default()
        };
        let PhysicalPlan::HashJoin(join) = physical(query) else {
            panic!("expected hash join");
        };
        // the columns are oriented to their sides regardless of the
        // direction the predicate was written in
        assert_eq!(join.left_column, ColumnRef::new("a", "x"));
        assert_eq!(join.right_column, ColumnRef::new("b", "x"));
    }

    #[test]
    fn non_equi_join_lowers_to_nested_loop() {
        let query = SelectQuery {
            from: vec!["a".into()],
            joins: vec![crate::query::JoinClause {
                table: "b".into(),
                on: Predicate::compare(
                    ColumnRef::new("a", "x"),
                    CompareOp::Lt,
                    ColumnRef::new("b", "x"),
                ),
            }],
            ..Default::default()
        };
        let PhysicalPlan::NestedLoopJoin(join) = physical(query) else {
            panic!("expected nested loop join");
        };
        assert!(join.condition.is_some());
    }

    #[test]
    fn cross_product_has_no_condition() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let PhysicalPlan::NestedLoopJoin(join) = physical(query) else {
            panic!("expected nested loop join");
        };
        assert!(join.condition.is_none());
    }
}
