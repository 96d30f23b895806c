//! Projection push-down.
//!
//! Narrows each table access to the set of columns the rest of the plan
//! actually touches: the final projection, every predicate and join
//! condition, order-by keys and aggregate arguments. Select-* plans and
//! write plans (which must round-trip whole rows) are left untouched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use itertools::Itertools;

use crate::logical_planner::{LogicalPlan, LogicalTableAccess, PlanRef};
use crate::query::{ColumnRef, ProjectionItem};

pub(super) fn apply(plan: PlanRef) -> PlanRef {
    if plan.is_write() {
        return plan;
    }
    let mut required = Required::default();
    required.collect(&plan);
    if !required.has_project {
        return plan;
    }
    narrow(&plan, &required.columns)
}

#[derive(Default)]
struct Required {
    columns: HashMap<String, HashSet<String>>,
    has_project: bool,
}

impl Required {
    fn add(&mut self, col: &ColumnRef) {
        self.columns
            .entry(col.table.clone())
            .or_default()
            .insert(col.column.clone());
    }

    fn collect(&mut self, plan: &PlanRef) {
        match &**plan {
            LogicalPlan::Project(project) => {
                self.has_project = true;
                for item in &project.items {
                    match item {
                        ProjectionItem::Column(col) => self.add(col),
                        ProjectionItem::Aggregate(call) => {
                            if let Some(col) = &call.column {
                                self.add(col);
                            }
                        }
                    }
                }
            }
            LogicalPlan::Select(select) => {
                for col in select.predicate.columns() {
                    self.add(col);
                }
            }
            LogicalPlan::Join(join) => {
                for col in join.condition.columns() {
                    self.add(col);
                }
            }
            LogicalPlan::Order(order) => {
                for pair in &order.orders {
                    self.add(&pair.column);
                }
            }
            LogicalPlan::Aggregate(agg) => {
                for call in &agg.calls {
                    if let Some(col) = &call.column {
                        self.add(col);
                    }
                }
            }
            LogicalPlan::Distinct(distinct) => self.add(&distinct.column),
            _ => {}
        }
        for child in plan.children() {
            self.collect(&child);
        }
    }
}

fn narrow(plan: &PlanRef, required: &HashMap<String, HashSet<String>>) -> PlanRef {
    if let LogicalPlan::TableAccess(access) = &**plan {
        let columns = required
            .get(&access.table_name)
            .map(|cols| cols.iter().cloned().sorted().collect())
            .unwrap_or_default();
        return Arc::new(LogicalPlan::TableAccess(LogicalTableAccess {
            table_id: access.table_id,
            table_name: access.table_name.clone(),
            columns: Some(columns),
        }));
    }
    let children: Vec<PlanRef> = plan
        .children()
        .into_iter()
        .map(|child| narrow(&child, required))
        .collect();
    if children.is_empty() {
        plan.clone()
    } else {
        Arc::new(plan.clone_with_children(&children))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::plan;
    use super::*;
    use crate::query::{Predicate, QueryDescription, SelectQuery};
    use crate::types::DataValue;

    fn scan_columns(plan: &PlanRef) -> Option<Vec<String>> {
        match &**plan {
            LogicalPlan::TableAccess(access) => access.columns.clone(),
            _ => plan.children().iter().find_map(scan_columns),
        }
    }

    #[test]
    fn scan_keeps_projected_and_filtered_columns() {
        // select x from a where y = 1: the scan needs x and y but not z
        let query = SelectQuery {
            from: vec!["a".into()],
            predicate: Some(Predicate::eq(ColumnRef::new("a", "y"), DataValue::Int64(1))),
            projection: vec![ProjectionItem::Column(ColumnRef::new("a", "x"))],
            ..Default::default()
        };
        let narrowed = apply(plan(QueryDescription::Select(query)));
        assert_eq!(
            scan_columns(&narrowed),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn select_star_keeps_every_column() {
        let query = SelectQuery::from_table("a");
        let narrowed = apply(plan(QueryDescription::Select(query)));
        assert_eq!(scan_columns(&narrowed), None);
    }

    #[test]
    fn write_plans_are_not_narrowed() {
        let query = crate::query::UpdateQuery {
            table: "a".into(),
            predicate: Some(Predicate::eq(ColumnRef::new("a", "y"), DataValue::Int64(1))),
            assignments: vec![],
        };
        let narrowed = apply(plan(QueryDescription::Update(query)));
        assert_eq!(scan_columns(&narrowed), None);
    }
}
