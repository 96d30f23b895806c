//! Query descriptions: the declarative shapes consumed by the planner.
//!
//! A query description arrives fully formed (the fluent builder surface
//! lives outside the engine) and is validated against the catalog before
//! any planning happens.

use parse_display::Display;
use serde::{Deserialize, Serialize};

mod predicate;
mod validate;

pub use self::predicate::{CompareOp, Operand, Predicate};
pub use self::validate::{ValidationError, Validator};

use crate::storage::Row;

/// A table-qualified column reference.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{table}.{column}")]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> ColumnRef {
        ColumnRef {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Sort direction of one order-by key.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

/// One order-by key. Multiple keys apply lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPair {
    pub column: ColumnRef,
    pub order: Order,
}

impl OrderPair {
    pub fn asc(column: ColumnRef) -> OrderPair {
        OrderPair {
            column,
            order: Order::Asc,
        }
    }

    pub fn desc(column: ColumnRef) -> OrderPair {
        OrderPair {
            column,
            order: Order::Desc,
        }
    }
}

/// The reduction applied by an aggregator.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[display(style = "lowercase")]
pub enum AggKind {
    Min,
    Max,
    Sum,
    Avg,
    Count,
    Stddev,
    /// Projects the distinct values of a column, one row per first
    /// occurrence. Unlike the reductions, this keeps the input cardinality
    /// of distinct values.
    Distinct,
}

/// An aggregator call in a projection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggCall {
    pub kind: AggKind,
    /// `None` only for `count(*)`.
    pub column: Option<ColumnRef>,
    /// Evaluate the reduction over the multiset of distinct values.
    pub distinct: bool,
}

impl AggCall {
    pub fn new(kind: AggKind, column: ColumnRef) -> AggCall {
        AggCall {
            kind,
            column: Some(column),
            distinct: false,
        }
    }

    pub fn new_distinct(kind: AggKind, column: ColumnRef) -> AggCall {
        AggCall {
            kind,
            column: Some(column),
            distinct: true,
        }
    }

    pub fn count_star() -> AggCall {
        AggCall {
            kind: AggKind::Count,
            column: None,
            distinct: false,
        }
    }

    /// The output column name of this call, e.g. `min(maxSalary)` or
    /// `count(distinct maxSalary)`.
    pub fn label(&self) -> String {
        match &self.column {
            None => format!("{}(*)", self.kind),
            Some(col) if self.distinct => format!("{}(distinct {})", self.kind, col.column),
            Some(col) => format!("{}({})", self.kind, col.column),
        }
    }
}

/// One item of a projection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionItem {
    Column(ColumnRef),
    Aggregate(AggCall),
}

impl ProjectionItem {
    /// The output column name this item produces.
    pub fn label(&self) -> String {
        match self {
            Self::Column(col) => col.column.clone(),
            Self::Aggregate(call) => call.label(),
        }
    }
}

/// An explicit inner join against one more table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub table: String,
    pub on: Predicate,
}

/// Declarative select.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectQuery {
    pub from: Vec<String>,
    pub joins: Vec<JoinClause>,
    pub predicate: Option<Predicate>,
    /// Empty means select-*.
    pub projection: Vec<ProjectionItem>,
    pub order_by: Vec<OrderPair>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn from_table(table: impl Into<String>) -> SelectQuery {
        SelectQuery {
            from: vec![table.into()],
            ..Default::default()
        }
    }
}

/// What to do when an inserted row id already exists.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[display(style = "lowercase")]
pub enum ConflictPolicy {
    #[default]
    Error,
    Replace,
}

/// Declarative insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertQuery {
    pub table: String,
    pub rows: Vec<Row>,
    pub on_conflict: ConflictPolicy,
}

/// The right-hand side of an update assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignValue {
    Value(crate::types::DataValue),
    /// Copy another column of the same row.
    Column(String),
}

/// One `column = value` pair of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: AssignValue,
}

/// Declarative update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuery {
    pub table: String,
    pub predicate: Option<Predicate>,
    pub assignments: Vec<Assignment>,
}

/// Declarative delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub table: String,
    pub predicate: Option<Predicate>,
}

/// A fully-formed query, ready for validation and planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryDescription {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
}
