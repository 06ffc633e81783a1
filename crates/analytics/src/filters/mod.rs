//! Filter implementations for record selection.

pub mod rating_range;
pub mod release_year;

// Re-export for convenience
pub use rating_range::RatingRangeFilter;
pub use release_year::ReleaseYearFilter;
