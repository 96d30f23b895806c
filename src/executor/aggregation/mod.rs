use super::ExecutorError;
use crate::query::{AggCall, AggKind};
use crate::types::{DataTypeKind, DataValue};

mod avg;
mod count;
mod distinct;
mod min_max;
mod stddev;
mod sum;

pub use self::avg::AvgState;
pub use self::count::CountState;
pub use self::distinct::DistinctState;
pub use self::min_max::MinMaxState;
pub use self::stddev::StdDevState;
pub use self::sum::SumState;

/// `AggregationState` records the state of an aggregation.
pub trait AggregationState: Send {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError>;

    fn output(&self) -> DataValue;
}

/// Creates the state for one aggregator call. `kind` is the declared type
/// of the aggregated column, when it has one.
pub fn create_state(call: &AggCall, kind: Option<DataTypeKind>) -> Box<dyn AggregationState> {
    let state: Box<dyn AggregationState> = match call.kind {
        AggKind::Min => MinMaxState::new(true),
        AggKind::Max => MinMaxState::new(false),
        AggKind::Sum => SumState::new(kind.unwrap_or(DataTypeKind::Int)),
        AggKind::Avg => AvgState::new(),
        AggKind::Count => CountState::new(),
        AggKind::Stddev => StdDevState::new(),
        AggKind::Distinct => unreachable!("distinct values are produced by the distinct operator"),
    };
    if call.distinct {
        DistinctState::new(state)
    } else {
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: &mut dyn AggregationState, values: &[DataValue]) -> DataValue {
        for value in values {
            state.update(value).unwrap();
        }
        state.output()
    }

    #[test]
    fn min_max_skip_nulls() {
        let values = [DataValue::Null, DataValue::Int64(3), DataValue::Int64(1)];
        assert_eq!(feed(&mut *MinMaxState::new(true), &values), DataValue::Int64(1));
        assert_eq!(feed(&mut *MinMaxState::new(false), &values), DataValue::Int64(3));
    }

    #[test]
    fn empty_input_edge_cases() {
        assert_eq!(feed(&mut *CountState::new(), &[]), DataValue::Int64(0));
        assert_eq!(
            feed(&mut *SumState::new(DataTypeKind::Int), &[]),
            DataValue::Int64(0)
        );
        assert_eq!(feed(&mut *MinMaxState::new(true), &[]), DataValue::Null);
        assert_eq!(feed(&mut *AvgState::new(), &[]), DataValue::Null);
        assert_eq!(feed(&mut *StdDevState::new(), &[]), DataValue::Null);
    }

    #[test]
    fn stddev_is_sample_deviation() {
        let values: Vec<DataValue> = [2i64, 4, 4, 4, 5, 5, 7, 9]
            .iter()
            .map(|&v| DataValue::Int64(v))
            .collect();
        let DataValue::Float64(out) = feed(&mut *StdDevState::new(), &values) else {
            panic!("expected a float");
        };
        // sample variance of this series is 32/7
        assert!((out.0 - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn single_value_stddev_is_absent() {
        assert_eq!(
            feed(&mut *StdDevState::new(), &[DataValue::Int64(5)]),
            DataValue::Null
        );
    }

    #[test]
    fn distinct_wrapper_deduplicates() {
        let mut state = DistinctState::new(CountState::new());
        let values = [
            DataValue::Int64(1),
            DataValue::Int64(1),
            DataValue::Int64(2),
            DataValue::Null,
        ];
        assert_eq!(feed(&mut *state, &values), DataValue::Int64(2));
    }

    #[test]
    fn sum_promotes_mixed_numerics() {
        let values = [DataValue::Int64(1), DataValue::from(0.5)];
        assert_eq!(
            feed(&mut *SumState::new(DataTypeKind::Int), &values),
            DataValue::from(1.5)
        );
    }
}
