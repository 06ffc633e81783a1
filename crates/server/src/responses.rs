//! JSON response shapes.
//!
//! Each ranking endpoint names its token key after what it counts
//! (`actor`, `director`, `genre`), the rating distribution is an object
//! keyed by bin label in bin order, and a missing highest/lowest movie
//! renders as `{}` rather than `null`.

use analytics::{Bucket, RankedEntry, RatedMovie, RatingStats};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCount {
    pub actor: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorCount {
    pub director: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecadeCount {
    pub decade: String,
    pub count: usize,
}

impl From<RankedEntry> for ActorCount {
    fn from(entry: RankedEntry) -> Self {
        Self {
            actor: entry.token,
            count: entry.count,
        }
    }
}

impl From<RankedEntry> for DirectorCount {
    fn from(entry: RankedEntry) -> Self {
        Self {
            director: entry.token,
            count: entry.count,
        }
    }
}

impl From<RankedEntry> for GenreCount {
    fn from(entry: RankedEntry) -> Self {
        Self {
            genre: entry.token,
            count: entry.count,
        }
    }
}

impl From<Bucket> for DecadeCount {
    fn from(bucket: Bucket) -> Self {
        Self {
            decade: bucket.label,
            count: bucket.count,
        }
    }
}

/// Bins serialized as `{"0-1": n, "1-2": n, ...}`, keeping bin order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDistribution(pub Vec<Bucket>);

impl Serialize for RatingDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bucket in &self.0 {
            map.serialize_entry(&bucket.label, &bucket.count)?;
        }
        map.end()
    }
}

fn empty_object_if_none<S: Serializer>(
    movie: &Option<RatedMovie>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match movie {
        Some(movie) => movie.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStatsResponse {
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
    #[serde(serialize_with = "empty_object_if_none")]
    pub highest_rated: Option<RatedMovie>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub lowest_rated: Option<RatedMovie>,
}

impl From<RatingStats> for RatingStatsResponse {
    fn from(stats: RatingStats) -> Self {
        Self {
            average_rating: stats.average_rating,
            rating_distribution: RatingDistribution(stats.rating_distribution),
            highest_rated: stats.highest_rated,
            lowest_rated: stats.lowest_rated,
        }
    }
}

/// Convert a whole ranking into one response row type
pub fn convert_all<T, U: From<T>>(items: Vec<T>) -> Vec<U> {
    items.into_iter().map(U::from).collect()
}
