//! Ranking of token counts.

use crate::counter::TokenCount;
use serde::Serialize;

/// One row of a ranking: a token and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub token: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(token: impl Into<String>, count: usize) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

/// Normalize a requested limit
///
/// Only a positive limit truncates. Zero and negative limits mean "no
/// limit", the same as not passing one.
pub fn effective_limit(limit: Option<i64>) -> Option<usize> {
    match limit {
        Some(n) if n > 0 => Some(n as usize),
        _ => None,
    }
}

/// Sort counts descending and optionally truncate
///
/// ## Algorithm
/// 1. Sort by count, highest first
/// 2. Equal counts keep the order their tokens were first seen in the scan
/// 3. Keep the first `limit` entries when the limit is positive
pub fn rank(counts: TokenCount, limit: Option<i64>) -> Vec<RankedEntry> {
    let mut entries: Vec<_> = counts.into_tallies().collect();
    entries.sort_unstable_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });

    if let Some(limit) = effective_limit(limit) {
        entries.truncate(limit);
    }

    entries
        .into_iter()
        .map(|(token, tally)| RankedEntry {
            token,
            count: tally.count,
        })
        .collect()
}
