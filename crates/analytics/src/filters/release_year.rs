//! Filter on the raw release date column.

use crate::traits::RecordFilter;
use data_loader::MovieRecord;

/// Keeps records whose `release_date` equals the given string exactly.
///
/// The comparison is textual: `"99"` does not match `"1999"`, and
/// `" 1999"` does not match `"1999"`. Records without a release date never
/// match.
pub struct ReleaseYearFilter {
    year: String,
}

impl ReleaseYearFilter {
    pub fn new(year: impl Into<String>) -> Self {
        Self { year: year.into() }
    }
}

impl RecordFilter for ReleaseYearFilter {
    fn name(&self) -> &str {
        "ReleaseYearFilter"
    }

    fn keep(&self, record: &MovieRecord) -> bool {
        record.release_date.as_deref() == Some(self.year.as_str())
    }
}
