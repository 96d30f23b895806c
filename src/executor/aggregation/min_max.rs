use super::*;

pub struct MinMaxState {
    result: DataValue,
    is_min: bool,
}

impl MinMaxState {
    pub fn new(is_min: bool) -> Box<Self> {
        Box::new(Self {
            result: DataValue::Null,
            is_min,
        })
    }
}

impl AggregationState for MinMaxState {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError> {
        if value.is_null() {
            return Ok(());
        }
        let better = match &self.result {
            DataValue::Null => true,
            current if self.is_min => value < current,
            current => value > current,
        };
        if better {
            self.result = value.clone();
        }
        Ok(())
    }

    fn output(&self) -> DataValue {
        self.result.clone()
    }
}
