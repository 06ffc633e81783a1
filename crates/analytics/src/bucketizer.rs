//! Bucketing of release years into decades and ratings into unit bins.

use data_loader::MovieRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of rating bins: `[0,1)` through `[10,11)`
pub const RATING_BIN_COUNT: usize = 11;

/// A labeled count, e.g. `"1990s"` or `"7-8"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Parse a release date as a base-10 year
///
/// Surrounding whitespace and a leading sign are accepted. Anything else
/// that isn't an ASCII-digit `i64` (`"未知"`, `"1994-09-10"`, `""`,
/// `"1_999"`, full-width digits, values beyond `i64`) is `None`.
pub fn parse_year(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Start year of the decade containing `year` (floor division, so `-5` -> `-10`)
///
/// Widened to `i128` so the decade of `i64::MIN` stays representable.
pub fn decade_of(year: i64) -> i128 {
    i128::from(year).div_euclid(10) * 10
}

/// Count records per decade, keyed by decade start year
///
/// Records without a release date, or whose date isn't an integer, are
/// skipped. Only decades with at least one record are present.
pub fn decade_counts<'a, I>(records: I) -> BTreeMap<i128, usize>
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(year) = record.release_date.as_deref().and_then(parse_year) {
            *counts.entry(decade_of(year)).or_insert(0) += 1;
        }
    }
    counts
}

/// Decade distribution, ascending by decade, labeled `"<decade>s"`
pub fn bucketize_decades<'a, I>(records: I) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    decade_counts(records)
        .into_iter()
        .map(|(decade, count)| Bucket::new(format!("{}s", decade), count))
        .collect()
}

/// Label of rating bin `i`: `"i-(i+1)"`
pub fn rating_bin_label(i: usize) -> String {
    format!("{}-{}", i, i + 1)
}

/// Rating distribution over the 11 half-open bins `[i, i+1)`
///
/// All bins are always returned, zero-filled. A rating belongs to bin `i`
/// when `i <= rating < i + 1`; ratings outside `[0, 11)` belong to none.
pub fn bucketize_ratings<'a, I>(records: I) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a MovieRecord>,
{
    let mut bins = [0usize; RATING_BIN_COUNT];
    for rating in records.into_iter().filter_map(|r| r.rating) {
        if let Some(i) = (0..RATING_BIN_COUNT)
            .find(|&i| rating >= i as f64 && rating < (i + 1) as f64)
        {
            bins[i] += 1;
        }
    }

    bins.iter()
        .enumerate()
        .map(|(i, &count)| Bucket::new(rating_bin_label(i), count))
        .collect()
}
