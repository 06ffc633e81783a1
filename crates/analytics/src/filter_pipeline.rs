//! The FilterPipeline chains multiple record filters.

use crate::traits::RecordFilter;
use data_loader::MovieRecord;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(RatingRangeFilter::new(8.0, 10.0))
///     .add_filter(ReleaseYearFilter::new("1994"));
///
/// let selected = pipeline.apply(records);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn RecordFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl RecordFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the records.
    pub fn apply(&self, records: Vec<MovieRecord>) -> Vec<MovieRecord> {
        let mut current = records;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current);
            debug!(
                "Filter applied: {} ({} -> {} records)",
                filter.name(),
                before,
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
