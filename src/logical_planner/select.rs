//! Logical planning of select queries.
//!
//! A select is planned as a compose of:
//!
//! - one [`LogicalTableAccess`] per `from` table, combined left-deep with
//!   [`LogicalCrossProduct`]
//! - one [`LogicalJoin`] per explicit inner join (its predicate is not
//!   duplicated in the filter)
//! - [`LogicalSelect`] (where), [`LogicalAggregate`], [`LogicalProject`],
//!   [`LogicalDistinct`], [`LogicalOrder`], [`LogicalSkip`] and
//!   [`LogicalLimit`], outermost last.

use std::sync::Arc;

use super::*;
use crate::query::{AggKind, SelectQuery};

impl LogicalPlanner {
    pub fn plan_select(&self, stmt: &SelectQuery) -> Result<PlanRef, PlanError> {
        let mut from = stmt.from.iter();
        let first = from.next().ok_or_else(|| {
            // validation guarantees a source table; guard anyway
            PlanError::UnknownTable(String::new())
        })?;
        let mut plan: PlanRef = Arc::new(LogicalPlan::TableAccess(self.table_access(first)?));
        for table in from {
            plan = Arc::new(LogicalPlan::CrossProduct(LogicalCrossProduct {
                left: plan,
                right: Arc::new(LogicalPlan::TableAccess(self.table_access(table)?)),
            }));
        }
        for join in &stmt.joins {
            plan = Arc::new(LogicalPlan::Join(LogicalJoin {
                condition: join.on.clone(),
                left: plan,
                right: Arc::new(LogicalPlan::TableAccess(self.table_access(&join.table)?)),
            }));
        }

        if let Some(predicate) = &stmt.predicate {
            plan = Arc::new(LogicalPlan::Select(LogicalSelect {
                predicate: predicate.clone(),
                child: plan,
            }));
        }

        let calls: Vec<AggCall> = stmt
            .projection
            .iter()
            .filter_map(|item| match item {
                ProjectionItem::Aggregate(call) if call.kind != AggKind::Distinct => {
                    Some(call.clone())
                }
                _ => None,
            })
            .collect();
        if !calls.is_empty() {
            let broadcast = stmt
                .projection
                .iter()
                .any(|item| matches!(item, ProjectionItem::Column(_)));
            plan = Arc::new(LogicalPlan::Aggregate(LogicalAggregate {
                calls,
                broadcast,
                child: plan,
            }));
        }

        if !stmt.projection.is_empty() {
            plan = Arc::new(LogicalPlan::Project(LogicalProject {
                items: stmt.projection.clone(),
                child: plan,
            }));
        }

        for item in &stmt.projection {
            if let ProjectionItem::Aggregate(call) = item {
                if call.kind == AggKind::Distinct {
                    let column = call.column.clone().ok_or(PlanError::AggregateWithoutColumn)?;
                    plan = Arc::new(LogicalPlan::Distinct(LogicalDistinct { column, child: plan }));
                }
            }
        }

        if !stmt.order_by.is_empty() {
            plan = Arc::new(LogicalPlan::Order(LogicalOrder {
                orders: stmt.order_by.clone(),
                child: plan,
            }));
        }
        if let Some(count) = stmt.skip {
            plan = Arc::new(LogicalPlan::Skip(LogicalSkip { count, child: plan }));
        }
        if let Some(count) = stmt.limit {
            plan = Arc::new(LogicalPlan::Limit(LogicalLimit { count, child: plan }));
        }
        Ok(plan)
    }
}
