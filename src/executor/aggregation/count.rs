use super::*;

/// Counts non-null values. `count(*)` is fed a constant per row, so it
/// counts rows.
#[derive(Default)]
pub struct CountState {
    count: i64,
}

impl CountState {
    pub fn new() -> Box<Self> {
        Box::default()
    }
}

impl AggregationState for CountState {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError> {
        if !value.is_null() {
            self.count += 1;
        }
        Ok(())
    }

    fn output(&self) -> DataValue {
        DataValue::Int64(self.count)
    }
}
