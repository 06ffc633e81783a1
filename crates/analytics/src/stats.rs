//! Rating statistics: average, distribution, highest and lowest rated.

use crate::bucketizer::{bucketize_ratings, Bucket};
use data_loader::{MovieId, MovieRecord};
use serde::Serialize;
use std::cmp::Ordering;

/// A movie singled out by rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedMovie {
    #[serde(skip)]
    pub id: MovieId,
    pub title: String,
    pub rating: f64,
}

impl RatedMovie {
    fn from_record(record: &MovieRecord, rating: f64) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            rating,
        }
    }
}

/// Summary statistics over every rated record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    /// Mean of all non-null ratings, `0.0` when nothing is rated
    pub average_rating: f64,
    /// The 11 half-open unit bins, always all present
    pub rating_distribution: Vec<Bucket>,
    pub highest_rated: Option<RatedMovie>,
    /// Lowest rating strictly above zero
    pub lowest_rated: Option<RatedMovie>,
}

/// Mean of the non-null ratings, or 0 when there are none
pub fn average_rating<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    let (sum, count) = records
        .into_iter()
        .filter_map(|r| r.rating)
        .fold((0.0, 0usize), |(sum, count), rating| (sum + rating, count + 1));

    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// Order by rating, then prefer the lower id
///
/// "Greater" means "better candidate for highest rated": on equal ratings the
/// record with the lower id compares greater.
fn by_rating_then_lower_id(a: &(&MovieRecord, f64), b: &(&MovieRecord, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| b.0.id.cmp(&a.0.id))
}

/// Record with the highest rating; ties go to the lowest id
pub fn highest_rated(records: &[MovieRecord]) -> Option<RatedMovie> {
    records
        .iter()
        .filter_map(|r| r.rating.map(|rating| (r, rating)))
        .max_by(by_rating_then_lower_id)
        .map(|(r, rating)| RatedMovie::from_record(r, rating))
}

/// Record with the lowest rating above zero; ties go to the lowest id
pub fn lowest_rated(records: &[MovieRecord]) -> Option<RatedMovie> {
    records
        .iter()
        .filter_map(|r| r.rating.map(|rating| (r, rating)))
        .filter(|(_, rating)| *rating > 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)))
        .map(|(r, rating)| RatedMovie::from_record(r, rating))
}

/// Compute all rating statistics in one call
pub fn compute_rating_stats(records: &[MovieRecord]) -> RatingStats {
    RatingStats {
        average_rating: average_rating(records),
        rating_distribution: bucketize_ratings(records),
        highest_rated: highest_rated(records),
        lowest_rated: lowest_rated(records),
    }
}
