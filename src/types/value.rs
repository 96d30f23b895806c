use ordered_float::OrderedFloat;
use parse_display::Display;
use serde::{Deserialize, Serialize};

use super::{Blob, DataTypeKind, Timestamp};

/// A wrapper around floats providing implementations of `Eq`, `Ord`, and `Hash`.
pub type F64 = OrderedFloat<f64>;

/// Primitive scalar value.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataValue {
    // NOTE: Null comes first.
    // => NULL is less than any non-NULL values
    #[display("null")]
    Null,
    #[display("{0}")]
    Bool(bool),
    #[display("{0}")]
    Int64(i64),
    #[display("{0}")]
    Float64(F64),
    #[display("'{0}'")]
    String(String),
    #[display("{0}")]
    Timestamp(Timestamp),
    #[display("{0}")]
    Blob(Blob),
}

impl DataValue {
    /// Returns `true` if value is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The kind of this value, or `None` for null.
    pub const fn kind(&self) -> Option<DataTypeKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(DataTypeKind::Bool),
            Self::Int64(_) => Some(DataTypeKind::Int),
            Self::Float64(_) => Some(DataTypeKind::Double),
            Self::String(_) => Some(DataTypeKind::String),
            Self::Timestamp(_) => Some(DataTypeKind::Timestamp),
            Self::Blob(_) => Some(DataTypeKind::Blob),
        }
    }

    /// Whether this value may be stored in a column of the given kind.
    pub fn conforms_to(&self, kind: DataTypeKind) -> bool {
        match self.kind() {
            None => true,
            Some(k) => k == kind,
        }
    }

    /// The zero value of the given kind. Used as the sum of an empty input.
    pub const fn zero(kind: DataTypeKind) -> Self {
        match kind {
            DataTypeKind::Int => Self::Int64(0),
            DataTypeKind::Double => Self::Float64(OrderedFloat(0.0)),
            _ => Self::Null,
        }
    }

    /// Reads the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(v.0),
            _ => None,
        }
    }

    /// Reads the value as an `i64` if it is an integer.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Adds another numeric value. Null absorbs; follows the host's integer
    /// and double semantics without saturation.
    pub fn add(&self, rhs: &DataValue) -> DataValue {
        use DataValue::*;
        match (self, rhs) {
            (Null, _) | (_, Null) => Null,
            (Int64(x), Int64(y)) => Int64(x + y),
            (Float64(x), Float64(y)) => Float64(*x + *y),
            (Int64(x), Float64(y)) | (Float64(y), Int64(x)) => {
                Float64(OrderedFloat(*x as f64) + *y)
            }
            _ => Null,
        }
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        Self::Float64(OrderedFloat(v))
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Timestamp> for DataValue {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Blob> for DataValue {
    fn from(v: Blob) -> Self {
        Self::Blob(v)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(DataValue::Int64(1), DataValue::Int64(2))]
    #[test_case(DataValue::Float64(OrderedFloat(1.5)), DataValue::Float64(OrderedFloat(2.5)))]
    #[test_case(DataValue::from("a"), DataValue::from("b"))]
    fn null_sorts_first(lo: DataValue, hi: DataValue) {
        assert!(DataValue::Null < lo);
        assert!(lo < hi);
    }

    #[test]
    fn add_promotes_to_double() {
        let sum = DataValue::Int64(1).add(&DataValue::from(0.5));
        assert_eq!(sum, DataValue::from(1.5));
    }

    #[test]
    fn add_absorbs_null() {
        assert_eq!(DataValue::Int64(1).add(&DataValue::Null), DataValue::Null);
    }
}
