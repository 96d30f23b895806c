use super::*;

#[derive(Default)]
pub struct AvgState {
    sum: f64,
    count: usize,
}

impl AvgState {
    pub fn new() -> Box<Self> {
        Box::default()
    }
}

impl AggregationState for AvgState {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError> {
        if let Some(v) = value.as_f64() {
            self.sum += v;
            self.count += 1;
        }
        Ok(())
    }

    fn output(&self) -> DataValue {
        if self.count == 0 {
            return DataValue::Null;
        }
        DataValue::from(self.sum / self.count as f64)
    }
}
