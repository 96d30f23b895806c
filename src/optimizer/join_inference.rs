//! Join inference.
//!
//! A select whose predicate equates one column from each side of the cross
//! product directly beneath it is lifted into an inner join, and the select
//! disappears.

use std::sync::Arc;

use super::map_children;
use crate::logical_planner::{LogicalJoin, LogicalPlan, PlanRef};

pub(super) fn apply(plan: PlanRef) -> (PlanRef, bool) {
    rewrite(&plan)
}

fn rewrite(plan: &PlanRef) -> (PlanRef, bool) {
    if let LogicalPlan::Select(select) = &**plan {
        if let LogicalPlan::CrossProduct(product) = &*select.child {
            if let Some((a, b)) = select.predicate.as_equi_join() {
                let left_tables = product.left.source_tables();
                let right_tables = product.right.source_tables();
                let spans_sides = (left_tables.contains(&a.table)
                    && right_tables.contains(&b.table))
                    || (left_tables.contains(&b.table) && right_tables.contains(&a.table));
                if spans_sides {
                    let join = Arc::new(LogicalPlan::Join(LogicalJoin {
                        condition: select.predicate.clone(),
                        left: product.left.clone(),
                        right: product.right.clone(),
                    }));
                    return (rewrite(&join).0, true);
                }
            }
        }
    }
    map_children(plan, &mut |child| rewrite(&child))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::plan;
    use super::*;
    use crate::query::{ColumnRef, Predicate, QueryDescription, SelectQuery};
    use crate::types::DataValue;

    #[test]
    fn equi_select_over_product_becomes_join() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::eq(
                ColumnRef::new("a", "x"),
                ColumnRef::new("b", "x"),
            )),
            ..Default::default()
        };
        let (rewritten, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(changed);
        assert!(matches!(&*rewritten, LogicalPlan::Join(_)));
    }

    #[test]
    fn same_side_equality_is_left_alone() {
        // both columns come from `a`: a filter, not a join
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::eq(
                ColumnRef::new("a", "x"),
                ColumnRef::new("a", "y"),
            )),
            ..Default::default()
        };
        let (rewritten, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(!changed);
        assert!(matches!(&*rewritten, LogicalPlan::Select(_)));
    }

    #[test]
    fn literal_select_is_left_alone() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::eq(ColumnRef::new("a", "x"), DataValue::Int64(1))),
            ..Default::default()
        };
        let (_, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(!changed);
    }
}
