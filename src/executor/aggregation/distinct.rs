use std::collections::HashSet;

use super::*;

/// Deduplicates the update stream of an inner state, evaluating it over
/// the multiset of distinct values.
pub struct DistinctState {
    seen: HashSet<DataValue>,
    inner: Box<dyn AggregationState>,
}

impl DistinctState {
    pub fn new(inner: Box<dyn AggregationState>) -> Box<Self> {
        Box::new(Self {
            seen: HashSet::new(),
            inner,
        })
    }
}

impl AggregationState for DistinctState {
    fn update(&mut self, value: &DataValue) -> Result<(), ExecutorError> {
        // nulls pass through: the inner state skips them anyway
        if value.is_null() || self.seen.insert(value.clone()) {
            return self.inner.update(value);
        }
        Ok(())
    }

    fn output(&self) -> DataValue {
        self.inner.output()
    }
}
