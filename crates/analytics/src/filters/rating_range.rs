//! Filter on the rating column.

use crate::traits::RecordFilter;
use data_loader::MovieRecord;

/// Lower bound used when the caller gives none
pub const DEFAULT_MIN_RATING: f64 = 0.0;

/// Upper bound used when the caller gives none
pub const DEFAULT_MAX_RATING: f64 = 10.0;

/// Keeps records with `min <= rating <= max` (closed on both ends).
///
/// Unrated records never match. An inverted range (`min > max`) matches
/// nothing.
pub struct RatingRangeFilter {
    min_rating: f64,
    max_rating: f64,
}

impl RatingRangeFilter {
    pub fn new(min_rating: f64, max_rating: f64) -> Self {
        Self {
            min_rating,
            max_rating,
        }
    }
}

impl Default for RatingRangeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATING, DEFAULT_MAX_RATING)
    }
}

impl RecordFilter for RatingRangeFilter {
    fn name(&self) -> &str {
        "RatingRangeFilter"
    }

    fn keep(&self, record: &MovieRecord) -> bool {
        record
            .rating
            .is_some_and(|r| r >= self.min_rating && r <= self.max_rating)
    }
}
