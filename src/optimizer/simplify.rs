//! Boolean simplification of predicate trees.
//!
//! Folds `not(not(p))`, distributes `not` over `and`/`or`, and toggles
//! `is null` negation. Comparison operators are deliberately not inverted
//! through `not`: under strict null semantics `not(x = v)` and `x <> v`
//! disagree on null inputs.

use std::sync::Arc;

use crate::logical_planner::{LogicalJoin, LogicalPlan, LogicalSelect, PlanRef};
use crate::query::Predicate;

pub(super) fn apply(plan: PlanRef) -> PlanRef {
    rewrite(&plan)
}

fn rewrite(plan: &PlanRef) -> PlanRef {
    let node = match &**plan {
        LogicalPlan::Select(select) => LogicalPlan::Select(LogicalSelect {
            predicate: simplify(select.predicate.clone()),
            child: rewrite(&select.child),
        }),
        LogicalPlan::Join(join) => LogicalPlan::Join(LogicalJoin {
            condition: simplify(join.condition.clone()),
            left: rewrite(&join.left),
            right: rewrite(&join.right),
        }),
        _ => {
            let children: Vec<PlanRef> = plan.children().iter().map(rewrite).collect();
            if children.is_empty() {
                return plan.clone();
            }
            plan.clone_with_children(&children)
        }
    };
    Arc::new(node)
}

fn simplify(predicate: Predicate) -> Predicate {
    match predicate {
        Predicate::And(a, b) => Predicate::And(simplify(*a).into(), simplify(*b).into()),
        Predicate::Or(a, b) => Predicate::Or(simplify(*a).into(), simplify(*b).into()),
        Predicate::Not(inner) => match *inner {
            Predicate::Not(p) => simplify(*p),
            Predicate::And(a, b) => Predicate::Or(
                simplify(Predicate::Not(a)).into(),
                simplify(Predicate::Not(b)).into(),
            ),
            Predicate::Or(a, b) => Predicate::And(
                simplify(Predicate::Not(a)).into(),
                simplify(Predicate::Not(b)).into(),
            ),
            Predicate::IsNull { column, negated } => Predicate::IsNull {
                column,
                negated: !negated,
            },
            other => Predicate::Not(simplify(other).into()),
        },
        leaf => leaf,
    }
}
