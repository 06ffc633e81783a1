//! Token frequency counting over a record snapshot.
//!
//! Besides the count, every token remembers where it was first seen as a
//! `(record index, token index)` pair. The ranker uses that position to
//! break count ties in scan order, and because positions are global (not
//! per shard) partial counts from parallel shards merge to exactly the
//! result of one sequential scan.

use crate::splitter::{tokens, Field};
use data_loader::MovieRecord;
use rayon::prelude::*;
use std::collections::HashMap;

/// `(record index, token index within the record)`
pub type ScanPosition = (usize, usize);

/// Count and first-seen position of one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub count: usize,
    pub first_seen: ScanPosition,
}

/// Mapping from token to occurrence count, built fresh per query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCount {
    tallies: HashMap<String, Tally>,
}

impl TokenCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token` seen at `position`
    pub fn record(&mut self, token: &str, position: ScanPosition) {
        match self.tallies.get_mut(token) {
            Some(tally) => {
                tally.count += 1;
                tally.first_seen = tally.first_seen.min(position);
            }
            None => {
                self.tallies.insert(
                    token.to_string(),
                    Tally {
                        count: 1,
                        first_seen: position,
                    },
                );
            }
        }
    }

    /// Split `raw` and count every token, as record number `record_index`
    pub fn record_field(&mut self, record_index: usize, raw: Option<&str>, delimiter: char) {
        for (token_index, token) in tokens(raw, delimiter).enumerate() {
            self.record(token, (record_index, token_index));
        }
    }

    /// Combine two partial counts: counts add, the earliest position wins
    pub fn merge(mut self, other: TokenCount) -> TokenCount {
        for (token, theirs) in other.tallies {
            self.tallies
                .entry(token)
                .and_modify(|ours| {
                    ours.count += theirs.count;
                    ours.first_seen = ours.first_seen.min(theirs.first_seen);
                })
                .or_insert(theirs);
        }
        self
    }

    /// Occurrences of `token` (0 if never seen)
    pub fn get(&self, token: &str) -> usize {
        self.tallies.get(token).map(|t| t.count).unwrap_or(0)
    }

    pub fn tally(&self, token: &str) -> Option<&Tally> {
        self.tallies.get(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.tallies.values().map(|t| t.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tally)> {
        self.tallies.iter().map(|(token, tally)| (token.as_str(), tally))
    }

    pub fn into_tallies(self) -> impl Iterator<Item = (String, Tally)> {
        self.tallies.into_iter()
    }
}

/// Count tokens of an arbitrary column
///
/// `selector` picks the raw column value out of a record. Records whose
/// column is absent or empty contribute nothing. Repeated tokens within one
/// record are all counted.
pub fn count_by<'a, I, F>(records: I, selector: F, delimiter: char) -> TokenCount
where
    I: IntoIterator<Item = &'a MovieRecord>,
    F: Fn(&MovieRecord) -> Option<&str>,
{
    let mut counts = TokenCount::new();
    for (record_index, record) in records.into_iter().enumerate() {
        counts.record_field(record_index, selector(record), delimiter);
    }
    counts
}

/// Count tokens of one of the delimiter-packed columns
pub fn count_tokens(records: &[MovieRecord], field: Field) -> TokenCount {
    count_by(records, |r| field.select(r), field.delimiter())
}

/// Parallel version of [`count_tokens`]
///
/// Splits the snapshot into shards of `shard_size` records, counts each
/// shard on the rayon pool and merges the partial counts. The result is
/// identical to the sequential count, first-seen positions included.
pub fn count_tokens_parallel(records: &[MovieRecord], field: Field, shard_size: usize) -> TokenCount {
    let shard_size = shard_size.max(1);
    let delimiter = field.delimiter();

    records
        .par_chunks(shard_size)
        .enumerate()
        .map(|(shard, chunk)| {
            let offset = shard * shard_size;
            let mut local = TokenCount::new();
            for (i, record) in chunk.iter().enumerate() {
                local.record_field(offset + i, field.select(record), delimiter);
            }
            local
        })
        .reduce(TokenCount::new, TokenCount::merge)
}
