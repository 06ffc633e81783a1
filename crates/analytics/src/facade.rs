//! # Movie Analytics
//!
//! The query surface of the crate. Each operation works on one snapshot of
//! the movie table:
//! 1. `list_by_year` / `movies_by_rating` select raw records
//! 2. `top_actors` / `top_directors` / `genre_counts` split, count and rank
//! 3. `decade_distribution` / `rating_distribution` / `rating_stats` bucket
//!
//! Every result is freshly allocated per call; nothing is cached.

use crate::bucketizer::{bucketize_decades, bucketize_ratings, Bucket};
use crate::counter::{count_tokens, count_tokens_parallel, TokenCount};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{RatingRangeFilter, ReleaseYearFilter};
use crate::ranker::{rank, RankedEntry};
use crate::splitter::Field;
use crate::stats::{compute_rating_stats, RatingStats};
use data_loader::{MovieRecord, MovieStore, Result};
use tracing::{debug, instrument};

/// Snapshots at least this large are counted on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Records per shard when counting in parallel
pub const DEFAULT_SHARD_SIZE: usize = 2_048;

/// Aggregations over one snapshot of movie records
#[derive(Debug, Clone)]
pub struct MovieAnalytics {
    records: Vec<MovieRecord>,
    parallel_threshold: usize,
    shard_size: usize,
}

impl MovieAnalytics {
    /// Wrap an already-fetched snapshot
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            shard_size: DEFAULT_SHARD_SIZE,
        }
    }

    /// Fetch a snapshot from the store
    pub fn from_store(store: &dyn MovieStore) -> Result<Self> {
        Ok(Self::new(store.fetch_all_movies()?))
    }

    /// Configure the snapshot size at which counting goes parallel (default: 10 000)
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Configure records per parallel shard (default: 2 048)
    pub fn with_shard_size(mut self, shard_size: usize) -> Self {
        self.shard_size = shard_size.max(1);
        self
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Count one delimiter-packed column, in parallel for large snapshots
    pub fn count(&self, field: Field) -> TokenCount {
        if self.records.len() >= self.parallel_threshold {
            debug!(
                "Counting {} over {} records in shards of {}",
                field.name(),
                self.records.len(),
                self.shard_size
            );
            count_tokens_parallel(&self.records, field, self.shard_size)
        } else {
            count_tokens(&self.records, field)
        }
    }

    fn ranked(&self, field: Field, limit: Option<i64>) -> Vec<RankedEntry> {
        let counts = self.count(field);
        debug!("{} distinct tokens in {}", counts.len(), field.name());
        rank(counts, limit)
    }

    /// Records whose `release_date` equals `year` exactly (string comparison)
    pub fn list_by_year(&self, year: &str) -> Vec<MovieRecord> {
        FilterPipeline::new()
            .add_filter(ReleaseYearFilter::new(year))
            .apply(self.records.clone())
    }

    /// Actors ranked by number of appearances
    #[instrument(skip(self))]
    pub fn top_actors(&self, limit: Option<i64>) -> Vec<RankedEntry> {
        self.ranked(Field::Actors, limit)
    }

    /// Directors ranked by number of films
    #[instrument(skip(self))]
    pub fn top_directors(&self, limit: Option<i64>) -> Vec<RankedEntry> {
        self.ranked(Field::Director, limit)
    }

    /// Every genre with its film count, most common first
    #[instrument(skip(self))]
    pub fn genre_counts(&self) -> Vec<RankedEntry> {
        self.ranked(Field::Genres, None)
    }

    /// Records with `min_rating <= rating <= max_rating`
    pub fn movies_by_rating(&self, min_rating: f64, max_rating: f64) -> Vec<MovieRecord> {
        FilterPipeline::new()
            .add_filter(RatingRangeFilter::new(min_rating, max_rating))
            .apply(self.records.clone())
    }

    /// Record counts per decade, ascending, observed decades only
    pub fn decade_distribution(&self) -> Vec<Bucket> {
        bucketize_decades(&self.records)
    }

    /// Record counts in the 11 unit rating bins
    pub fn rating_distribution(&self) -> Vec<Bucket> {
        bucketize_ratings(&self.records)
    }

    /// Average, distribution and extremes of the rating column
    #[instrument(skip(self))]
    pub fn rating_stats(&self) -> RatingStats {
        compute_rating_stats(&self.records)
    }
}
