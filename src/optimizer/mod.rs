//! Rule-driven rewriting of logical plans.
//!
//! The optimizer applies its rules in a fixed order: predicate push-down
//! runs before join inference so that join predicates surface as standalone
//! selects before being lifted, then scans are narrowed to the columns the
//! rest of the plan needs, and finally boolean expressions are simplified.

use tracing::debug;

use crate::logical_planner::PlanRef;

mod filter_pushdown;
mod join_inference;
mod projection_pushdown;
mod simplify;

/// Upper bound on push-down/inference passes. Each pass moves at least one
/// select strictly downwards, so real plans converge long before this.
const MAX_PASSES: usize = 64;

#[derive(Default)]
pub struct Optimizer;

impl Optimizer {
    pub fn optimize(&self, mut plan: PlanRef) -> PlanRef {
        for pass in 0..MAX_PASSES {
            let (pushed, changed_push) = filter_pushdown::apply(plan);
            let (inferred, changed_infer) = join_inference::apply(pushed);
            plan = inferred;
            if !changed_push && !changed_infer {
                debug!(passes = pass, "rewrites reached fixpoint");
                break;
            }
        }
        plan = projection_pushdown::apply(plan);
        simplify::apply(plan)
    }
}

/// Rebuilds `plan` with each child replaced by `f(child)`, tracking whether
/// anything changed.
pub(crate) fn map_children(
    plan: &PlanRef,
    f: &mut impl FnMut(PlanRef) -> (PlanRef, bool),
) -> (PlanRef, bool) {
    let children = plan.children();
    if children.is_empty() {
        return (plan.clone(), false);
    }
    let mut changed = false;
    let new_children: Vec<PlanRef> = children
        .into_iter()
        .map(|child| {
            let (new_child, child_changed) = f(child);
            changed |= child_changed;
            new_child
        })
        .collect();
    if changed {
        (plan.clone_with_children(&new_children).into(), true)
    } else {
        (plan.clone(), false)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use crate::catalog::ColumnCatalog;
    use crate::logical_planner::{LogicalPlanner, PlanRef};
    use crate::query::QueryDescription;
    use crate::storage::InMemoryStorage;
    use crate::types::{DataTypeExt, DataTypeKind};

    /// Two small tables and a planner over them.
    pub fn plan(query: QueryDescription) -> PlanRef {
        let storage = InMemoryStorage::new();
        for name in ["a", "b"] {
            storage
                .create_table(
                    name,
                    vec![
                        ColumnCatalog::new(
                            0,
                            "x".into(),
                            DataTypeKind::Int.not_null().to_column_primary_key(),
                        ),
                        ColumnCatalog::new(1, "y".into(), DataTypeKind::Int.nullable().to_column()),
                        ColumnCatalog::new(2, "z".into(), DataTypeKind::Int.nullable().to_column()),
                    ],
                    vec![],
                )
                .unwrap();
        }
        let planner = LogicalPlanner::new(Arc::clone(storage.catalog()));
        planner.plan(&query).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::plan;
    use super::*;
    use crate::logical_planner::LogicalPlan;
    use crate::query::{ColumnRef, Predicate, SelectQuery};
    use crate::types::DataValue;

    #[test]
    fn join_predicate_and_filter_are_separated() {
        // select * from a, b where a.x = b.x and a.y = 1
        let query = SelectQuery {
            from: vec!["a".into(), "b".into()],
            predicate: Some(
                Predicate::eq(ColumnRef::new("a", "x"), ColumnRef::new("b", "x"))
                    .and(Predicate::eq(ColumnRef::new("a", "y"), DataValue::Int64(1))),
            ),
            ..Default::default()
        };
        let optimized = Optimizer.optimize(plan(crate::query::QueryDescription::Select(query)));

        // the equality is lifted into a join, the literal filter is pushed
        // below it onto the scan of `a`
        let LogicalPlan::Join(join) = &*optimized else {
            panic!("expected join at the root, got {optimized:?}");
        };
        let LogicalPlan::Select(select) = &*join.left else {
            panic!("expected pushed filter on the left side, got {:?}", join.left);
        };
        assert!(matches!(&*select.child, LogicalPlan::TableAccess(_)));
        assert!(matches!(&*join.right, LogicalPlan::TableAccess(_)));
    }
}
