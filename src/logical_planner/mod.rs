use std::collections::HashSet;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::catalog::{RootCatalogRef, TableId};
use crate::query::{
    AggCall, Assignment, ColumnRef, ConflictPolicy, OrderPair, Predicate, ProjectionItem,
    QueryDescription,
};
use crate::storage::Row;

mod delete;
mod insert;
mod select;
mod update;

/// The error type of the planners.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("aggregate requires a column argument")]
    AggregateWithoutColumn,
}

pub type PlanRef = Arc<LogicalPlan>;

/// A node of the logical relational-algebra tree, independent of execution
/// strategy. The enum is closed so rewrite rules can pattern-match.
#[derive(Debug, PartialEq, Clone)]
pub enum LogicalPlan {
    TableAccess(LogicalTableAccess),
    Select(LogicalSelect),
    Project(LogicalProject),
    CrossProduct(LogicalCrossProduct),
    Join(LogicalJoin),
    Order(LogicalOrder),
    Skip(LogicalSkip),
    Limit(LogicalLimit),
    Aggregate(LogicalAggregate),
    Distinct(LogicalDistinct),
    Insert(LogicalInsert),
    Update(LogicalUpdate),
    Delete(LogicalDelete),
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalTableAccess {
    pub table_id: TableId,
    pub table_name: String,
    /// `None` reads every column; projection push-down narrows this.
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalSelect {
    pub predicate: Predicate,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalProject {
    pub items: Vec<ProjectionItem>,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalCrossProduct {
    pub left: PlanRef,
    pub right: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalJoin {
    pub condition: Predicate,
    pub left: PlanRef,
    pub right: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalOrder {
    pub orders: Vec<OrderPair>,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalSkip {
    pub count: usize,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalLimit {
    pub count: usize,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalAggregate {
    pub calls: Vec<AggCall>,
    /// When the projection mixes plain columns with reductions, the computed
    /// scalars are broadcast onto every input row instead of collapsing the
    /// input to a single row. This mirrors the source engine's behaviour and
    /// is deliberately not SQL's GROUP BY.
    pub broadcast: bool,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalDistinct {
    pub column: ColumnRef,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalInsert {
    pub table_id: TableId,
    pub table_name: String,
    pub rows: Vec<Row>,
    pub on_conflict: ConflictPolicy,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalUpdate {
    pub table_id: TableId,
    pub table_name: String,
    pub assignments: Vec<Assignment>,
    pub child: PlanRef,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LogicalDelete {
    pub table_id: TableId,
    pub table_name: String,
    pub child: PlanRef,
}

impl LogicalPlan {
    /// The children of this node, in left-to-right order.
    pub fn children(&self) -> SmallVec<[PlanRef; 2]> {
        let mut children = SmallVec::new();
        match self {
            Self::TableAccess(_) | Self::Insert(_) => {}
            Self::Select(node) => children.push(node.child.clone()),
            Self::Project(node) => children.push(node.child.clone()),
            Self::CrossProduct(node) => {
                children.push(node.left.clone());
                children.push(node.right.clone());
            }
            Self::Join(node) => {
                children.push(node.left.clone());
                children.push(node.right.clone());
            }
            Self::Order(node) => children.push(node.child.clone()),
            Self::Skip(node) => children.push(node.child.clone()),
            Self::Limit(node) => children.push(node.child.clone()),
            Self::Aggregate(node) => children.push(node.child.clone()),
            Self::Distinct(node) => children.push(node.child.clone()),
            Self::Update(node) => children.push(node.child.clone()),
            Self::Delete(node) => children.push(node.child.clone()),
        }
        children
    }

    /// A copy of this node with its children replaced, preserving all other
    /// attributes. `children` must match the node's arity.
    pub fn clone_with_children(&self, children: &[PlanRef]) -> LogicalPlan {
        match self {
            Self::TableAccess(_) | Self::Insert(_) => self.clone(),
            Self::Select(node) => Self::Select(LogicalSelect {
                predicate: node.predicate.clone(),
                child: children[0].clone(),
            }),
            Self::Project(node) => Self::Project(LogicalProject {
                items: node.items.clone(),
                child: children[0].clone(),
            }),
            Self::CrossProduct(_) => Self::CrossProduct(LogicalCrossProduct {
                left: children[0].clone(),
                right: children[1].clone(),
            }),
            Self::Join(node) => Self::Join(LogicalJoin {
                condition: node.condition.clone(),
                left: children[0].clone(),
                right: children[1].clone(),
            }),
            Self::Order(node) => Self::Order(LogicalOrder {
                orders: node.orders.clone(),
                child: children[0].clone(),
            }),
            Self::Skip(node) => Self::Skip(LogicalSkip {
                count: node.count,
                child: children[0].clone(),
            }),
            Self::Limit(node) => Self::Limit(LogicalLimit {
                count: node.count,
                child: children[0].clone(),
            }),
            Self::Aggregate(node) => Self::Aggregate(LogicalAggregate {
                calls: node.calls.clone(),
                broadcast: node.broadcast,
                child: children[0].clone(),
            }),
            Self::Distinct(node) => Self::Distinct(LogicalDistinct {
                column: node.column.clone(),
                child: children[0].clone(),
            }),
            Self::Update(node) => Self::Update(LogicalUpdate {
                table_id: node.table_id,
                table_name: node.table_name.clone(),
                assignments: node.assignments.clone(),
                child: children[0].clone(),
            }),
            Self::Delete(node) => Self::Delete(LogicalDelete {
                table_id: node.table_id,
                table_name: node.table_name.clone(),
                child: children[0].clone(),
            }),
        }
    }

    /// The set of table names whose rows this subtree produces.
    pub fn source_tables(&self) -> HashSet<String> {
        match self {
            Self::TableAccess(node) => HashSet::from([node.table_name.clone()]),
            _ => self
                .children()
                .iter()
                .flat_map(|c| c.source_tables())
                .collect(),
        }
    }

    /// Whether this subtree contains a write node. Write plans must
    /// round-trip whole rows, which disables column narrowing.
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Insert(_) | Self::Update(_) | Self::Delete(_))
            || self.children().iter().any(|c| c.is_write())
    }
}

/// Builds the initial logical tree from a validated query description.
pub struct LogicalPlanner {
    catalog: RootCatalogRef,
}

impl LogicalPlanner {
    pub fn new(catalog: RootCatalogRef) -> LogicalPlanner {
        LogicalPlanner { catalog }
    }

    pub fn plan(&self, query: &QueryDescription) -> Result<PlanRef, PlanError> {
        match query {
            QueryDescription::Select(select) => self.plan_select(select),
            QueryDescription::Insert(insert) => self.plan_insert(insert),
            QueryDescription::Update(update) => self.plan_update(update),
            QueryDescription::Delete(delete) => self.plan_delete(delete),
        }
    }

    pub(crate) fn table_access(&self, name: &str) -> Result<LogicalTableAccess, PlanError> {
        let table = self
            .catalog
            .get_table_by_name(name)
            .ok_or_else(|| PlanError::UnknownTable(name.into()))?;
        Ok(LogicalTableAccess {
            table_id: table.id(),
            table_name: name.into(),
            columns: None,
        })
    }
}
