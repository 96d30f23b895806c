use super::*;

pub struct SumState {
    result: DataValue,
}

impl SumState {
    /// Starts from the zero of the column's kind, so an empty input sums
    /// to zero rather than to the absent marker.
    pub fn new(kind: DataTypeKind) -> Box<Self> {
        Box::new(Self {
            result: DataValue::zero(kind),
        })
    }
}

impl AggregationState for SumState {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError> {
        if !value.is_null() {
            self.result = self.result.add(value);
        }
        Ok(())
    }

    fn output(&self) -> DataValue {
        self.result.clone()
    }
}
