//! Core trait for record filtering.
//!
//! Query shapes that select raw records (by release year, by rating range)
//! are expressed as composable filters.

use data_loader::MovieRecord;

/// A predicate over movie records.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent requests
/// - `apply` takes ownership of the Vec and returns the kept records,
///   so no record is cloned while filtering
pub trait RecordFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `record` passes this filter
    fn keep(&self, record: &MovieRecord) -> bool;

    /// Keep the records that pass, in their original order
    fn apply(&self, records: Vec<MovieRecord>) -> Vec<MovieRecord> {
        records.into_iter().filter(|r| self.keep(r)).collect()
    }
}
