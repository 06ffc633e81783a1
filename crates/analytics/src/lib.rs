//! Aggregations over delimiter-packed movie records.
//!
//! This crate provides:
//! - Field splitting for the comma/slash-packed columns
//! - Token frequency counting (sequential and rayon-sharded)
//! - Stable ranking with first-seen tie-breaks
//! - Decade and rating bucketing, rating statistics
//! - RecordFilter trait and FilterPipeline for record selection
//! - MovieAnalytics, the query facade tying it all together
//!
//! ## Architecture
//! A query runs in stages over one snapshot:
//! 1. The splitter turns a raw column into tokens
//! 2. The counter tallies tokens and remembers where each was first seen
//! 3. The ranker sorts by count, breaking ties in scan order
//!
//! ## Example Usage
//! ```ignore
//! use analytics::MovieAnalytics;
//!
//! let analytics = MovieAnalytics::from_store(&catalog)?;
//! let top_ten = analytics.top_actors(Some(10));
//! let stats = analytics.rating_stats();
//! ```

pub mod splitter;
pub mod counter;
pub mod ranker;
pub mod bucketizer;
pub mod stats;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod facade;

// Re-export main types
pub use bucketizer::{Bucket, bucketize_decades, bucketize_ratings};
pub use counter::{TokenCount, count_by, count_tokens, count_tokens_parallel};
pub use facade::MovieAnalytics;
pub use filter_pipeline::FilterPipeline;
pub use filters::rating_range::{DEFAULT_MAX_RATING, DEFAULT_MIN_RATING};
pub use ranker::{RankedEntry, rank};
pub use splitter::{Field, split_field};
pub use stats::{RatedMovie, RatingStats};
pub use traits::RecordFilter;
