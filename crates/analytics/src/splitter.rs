//! Field splitting for delimiter-packed columns.
//!
//! The store keeps multi-value columns as plain strings:
//! actors and genres are comma-separated, directors slash-separated.
//! There is no quoting or escaping, so a delimiter inside a value (a comma
//! in an actor's name) is indistinguishable from a separator.

use data_loader::MovieRecord;

/// Delimiter for the `actors` and `genres` columns
pub const LIST_DELIMITER: char = ',';

/// Delimiter for the `director` column
pub const DIRECTOR_DELIMITER: char = '/';

/// A multi-value column of [`MovieRecord`], paired with its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Actors,
    Director,
    Genres,
}

impl Field {
    pub fn delimiter(self) -> char {
        match self {
            Field::Actors | Field::Genres => LIST_DELIMITER,
            Field::Director => DIRECTOR_DELIMITER,
        }
    }

    /// The raw, unsplit value of this column
    pub fn select(self, record: &MovieRecord) -> Option<&str> {
        match self {
            Field::Actors => record.actors.as_deref(),
            Field::Director => record.director.as_deref(),
            Field::Genres => record.genres.as_deref(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Actors => "actors",
            Field::Director => "director",
            Field::Genres => "genres",
        }
    }
}

/// Iterate over the trimmed, non-empty pieces of `raw`
///
/// Borrowing version of [`split_field`]; the counter uses this to avoid
/// allocating a `String` for tokens it has already seen.
pub fn tokens(raw: Option<&str>, delimiter: char) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Split a raw column value into trimmed, non-empty tokens
///
/// Example: `split_field(Some("A / B"), '/')` -> `["A", "B"]`
///          `split_field(Some(" , "), ',')` -> `[]`
///          `split_field(None, ',')` -> `[]`
pub fn split_field(raw: Option<&str>, delimiter: char) -> Vec<String> {
    tokens(raw, delimiter).map(str::to_string).collect()
}
