//! Predicate push-down.
//!
//! Splits conjunctive selects into nested single-factor selects, then moves
//! each select below a cross product or join whenever every table it
//! references lives in one child subtree.

use std::sync::Arc;

use super::map_children;
use crate::logical_planner::{LogicalCrossProduct, LogicalJoin, LogicalPlan, LogicalSelect, PlanRef};

pub(super) fn apply(plan: PlanRef) -> (PlanRef, bool) {
    rewrite(&plan)
}

fn rewrite(plan: &PlanRef) -> (PlanRef, bool) {
    if let LogicalPlan::Select(select) = &**plan {
        // split `p1 AND p2` into nested selects
        let conjuncts = select.predicate.clone().into_conjuncts();
        if conjuncts.len() > 1 {
            let mut child = select.child.clone();
            for predicate in conjuncts.into_iter().rev() {
                child = Arc::new(LogicalPlan::Select(LogicalSelect { predicate, child }));
            }
            return (rewrite(&child).0, true);
        }
        // push a single-factor select below a product or join
        if let Some(pushed) = push_below(select) {
            return (rewrite(&pushed).0, true);
        }
    }
    map_children(plan, &mut |child| rewrite(&child))
}

fn push_below(select: &LogicalSelect) -> Option<PlanRef> {
    let tables = select.predicate.tables();
    let (left, right) = match &*select.child {
        LogicalPlan::CrossProduct(product) => (&product.left, &product.right),
        LogicalPlan::Join(join) => (&join.left, &join.right),
        _ => return None,
    };
    let left_tables = left.source_tables();
    let right_tables = right.source_tables();
    let into_left = tables.iter().all(|t| left_tables.contains(*t));
    let into_right = !into_left && tables.iter().all(|t| right_tables.contains(*t));
    if !into_left && !into_right {
        return None;
    }

    let wrap = |child: &PlanRef| -> PlanRef {
        Arc::new(LogicalPlan::Select(LogicalSelect {
            predicate: select.predicate.clone(),
            child: child.clone(),
        }))
    };
    let (new_left, new_right) = if into_left {
        (wrap(left), right.clone())
    } else {
        (left.clone(), wrap(right))
    };
    Some(Arc::new(match &*select.child {
        LogicalPlan::CrossProduct(_) => LogicalPlan::CrossProduct(LogicalCrossProduct {
            left: new_left,
            right: new_right,
        }),
        LogicalPlan::Join(join) => LogicalPlan::Join(LogicalJoin {
            condition: join.condition.clone(),
            left: new_left,
            right: new_right,
        }),
        _ => unreachable!(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::plan;
    use super::*;
    use crate::query::{ColumnRef, Predicate, QueryDescription, SelectQuery};
    use crate::types::DataValue;

    #[test]
    fn conjunction_splits_into_nested_selects() {
        let query = SelectQuery {
            from: vec!["a".into()],
            predicate: Some(
                Predicate::eq(ColumnRef::new("a", "x"), DataValue::Int64(1))
                    .and(Predicate::eq(ColumnRef::new("a", "y"), DataValue::Int64(2))),
            ),
            ..Default::default()
        };
        let (rewritten, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(changed);
        let LogicalPlan::Select(outer) = &*rewritten else {
            panic!("expected select, got {rewritten:?}");
        };
        assert!(matches!(&*outer.child, LogicalPlan::Select(_)));
    }

    #[test]
    fn single_side_filter_moves_below_product() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::eq(ColumnRef::new("b", "y"), DataValue::Int64(2))),
            ..Default::default()
        };
        let (rewritten, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(changed);
        let LogicalPlan::CrossProduct(product) = &*rewritten else {
            panic!("expected product at the root, got {rewritten:?}");
        };
        assert!(matches!(&*product.right, LogicalPlan::Select(_)));
        assert!(matches!(&*product.left, LogicalPlan::TableAccess(_)));
    }

    #[test]
    fn cross_table_predicate_stays_put() {
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(Predicate::compare(
                ColumnRef::new("a", "y"),
                crate::query::CompareOp::Lt,
                ColumnRef::new("b", "y"),
            )),
            ..Default::default()
        };
        let (rewritten, changed) = apply(plan(QueryDescription::Select(query)));
        assert!(!changed);
        assert!(matches!(&*rewritten, LogicalPlan::Select(_)));
    }
}
