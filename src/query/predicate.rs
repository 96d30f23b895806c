use std::collections::HashSet;

use parse_display::Display;
use serde::{Deserialize, Serialize};

use super::ColumnRef;
use crate::storage::Tuple;
use crate::types::DataValue;

/// Comparison operator of a leaf predicate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<>")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
}

/// The right-hand side of a comparison: a literal, or another column for
/// join predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Value(DataValue),
    Column(ColumnRef),
}

impl From<DataValue> for Operand {
    fn from(v: DataValue) -> Self {
        Operand::Value(v)
    }
}

impl From<ColumnRef> for Operand {
    fn from(c: ColumnRef) -> Self {
        Operand::Column(c)
    }
}

/// A pure boolean expression over one composite row.
///
/// Null semantics are strict two-valued: any comparison, `Between` or `In`
/// involving a null value evaluates to `false`. Only `IsNull` observes
/// nulls positively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        left: ColumnRef,
        op: CompareOp,
        right: Operand,
    },
    Between {
        column: ColumnRef,
        low: DataValue,
        high: DataValue,
    },
    In {
        column: ColumnRef,
        values: Vec<DataValue>,
    },
    IsNull {
        column: ColumnRef,
        negated: bool,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn eq(left: ColumnRef, right: impl Into<Operand>) -> Predicate {
        Self::compare(left, CompareOp::Eq, right)
    }

    pub fn compare(left: ColumnRef, op: CompareOp, right: impl Into<Operand>) -> Predicate {
        Predicate::Compare {
            left,
            op,
            right: right.into(),
        }
    }

    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(self.into(), other.into())
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(self.into(), other.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(self.into())
    }

    /// Evaluates this predicate against one composite row.
    pub fn evaluate(&self, tuple: &Tuple) -> bool {
        match self {
            Predicate::Compare { left, op, right } => {
                let lhs = tuple.value(&left.table, &left.column);
                let rhs = match right {
                    Operand::Value(v) => v,
                    Operand::Column(c) => tuple.value(&c.table, &c.column),
                };
                if lhs.is_null() || rhs.is_null() {
                    return false;
                }
                match op {
                    CompareOp::Eq => lhs == rhs,
                    CompareOp::Ne => lhs != rhs,
                    CompareOp::Lt => lhs < rhs,
                    CompareOp::Le => lhs <= rhs,
                    CompareOp::Gt => lhs > rhs,
                    CompareOp::Ge => lhs >= rhs,
                }
            }
            Predicate::Between { column, low, high } => {
                let v = tuple.value(&column.table, &column.column);
                if v.is_null() || low.is_null() || high.is_null() {
                    return false;
                }
                low <= v && v <= high
            }
            Predicate::In { column, values } => {
                let v = tuple.value(&column.table, &column.column);
                !v.is_null() && values.contains(v)
            }
            Predicate::IsNull { column, negated } => {
                let v = tuple.value(&column.table, &column.column);
                v.is_null() != *negated
            }
            Predicate::And(a, b) => a.evaluate(tuple) && b.evaluate(tuple),
            Predicate::Or(a, b) => a.evaluate(tuple) || b.evaluate(tuple),
            Predicate::Not(p) => !p.evaluate(tuple),
        }
    }

    /// All column references in this tree.
    pub fn columns(&self) -> Vec<&ColumnRef> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Predicate::Compare { left, right, .. } => {
                out.push(left);
                if let Operand::Column(c) = right {
                    out.push(c);
                }
            }
            Predicate::Between { column, .. }
            | Predicate::In { column, .. }
            | Predicate::IsNull { column, .. } => out.push(column),
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
            Predicate::Not(p) => p.collect_columns(out),
        }
    }

    /// The set of table names this tree references.
    pub fn tables(&self) -> HashSet<&str> {
        self.columns().into_iter().map(|c| c.table.as_str()).collect()
    }

    /// Splits a conjunction into its factors; a non-conjunction is its own
    /// single factor.
    pub fn into_conjuncts(self) -> Vec<Predicate> {
        match self {
            Predicate::And(a, b) => {
                let mut out = a.into_conjuncts();
                out.extend(b.into_conjuncts());
                out
            }
            other => vec![other],
        }
    }

    /// Returns the two sides if this is a plain column-to-column equality.
    pub fn as_equi_join(&self) -> Option<(&ColumnRef, &ColumnRef)> {
        match self {
            Predicate::Compare {
                left,
                op: CompareOp::Eq,
                right: Operand::Column(right),
            } => Some((left, right)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use test_case::test_case;

    use super::*;
    use crate::storage::Row;

    fn tuple(v: DataValue) -> Tuple {
        let mut row = Row::new(1, Default::default());
        row.set("v", v);
        Tuple::single(Arc::from("t"), row)
    }

    fn col() -> ColumnRef {
        ColumnRef::new("t", "v")
    }

    #[test_case(CompareOp::Eq, 5, true)]
    #[test_case(CompareOp::Ne, 5, false)]
    #[test_case(CompareOp::Lt, 9, true)]
    #[test_case(CompareOp::Ge, 9, false)]
    fn compare_against_literal(op: CompareOp, rhs: i64, expected: bool) {
        let p = Predicate::compare(col(), op, DataValue::Int64(rhs));
        assert_eq!(p.evaluate(&tuple(DataValue::Int64(5))), expected);
    }

    #[test_case(CompareOp::Eq)]
    #[test_case(CompareOp::Ne)]
    #[test_case(CompareOp::Lt)]
    fn comparisons_with_null_are_false(op: CompareOp) {
        let p = Predicate::compare(col(), op, DataValue::Int64(5));
        assert!(!p.evaluate(&tuple(DataValue::Null)));
    }

    #[test]
    fn is_null_observes_null() {
        let p = Predicate::IsNull {
            column: col(),
            negated: false,
        };
        assert!(p.evaluate(&tuple(DataValue::Null)));
        assert!(!p.evaluate(&tuple(DataValue::Int64(5))));
    }

    #[test]
    fn between_and_in() {
        let between = Predicate::Between {
            column: col(),
            low: DataValue::Int64(1),
            high: DataValue::Int64(9),
        };
        assert!(between.evaluate(&tuple(DataValue::Int64(5))));
        assert!(!between.evaluate(&tuple(DataValue::Int64(10))));

        let within = Predicate::In {
            column: col(),
            values: vec![DataValue::Int64(3), DataValue::Int64(5)],
        };
        assert!(within.evaluate(&tuple(DataValue::Int64(5))));
        assert!(!within.evaluate(&tuple(DataValue::Null)));
    }

    #[test]
    fn boolean_combinators() {
        let eq5 = Predicate::eq(col(), DataValue::Int64(5));
        let eq6 = Predicate::eq(col(), DataValue::Int64(6));
        let t = tuple(DataValue::Int64(5));
        assert!(eq5.clone().or(eq6.clone()).evaluate(&t));
        assert!(!eq5.clone().and(eq6).evaluate(&t));
        assert!(!eq5.not().evaluate(&t));
    }

    #[test]
    fn conjunct_splitting() {
        let p = Predicate::eq(col(), DataValue::Int64(1))
            .and(Predicate::eq(col(), DataValue::Int64(2)))
            .and(Predicate::eq(col(), DataValue::Int64(3)));
        assert_eq!(p.into_conjuncts().len(), 3);
    }

    #[test]
    fn equi_join_detection() {
        let p = Predicate::eq(ColumnRef::new("a", "x"), ColumnRef::new("b", "y"));
        let (l, r) = p.as_equi_join().unwrap();
        assert_eq!((l.table.as_str(), r.table.as_str()), ("a", "b"));
        assert!(Predicate::eq(col(), DataValue::Int64(1))
            .as_equi_join()
            .is_none());
    }
}
