//! Core domain types for the movie catalog.
//!
//! Multi-value columns (director, actors, genres) are kept exactly as the
//! store hands them over: raw delimiter-packed strings. Splitting them is the
//! analytics crate's job, at query time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie record
pub type MovieId = i64;

// =============================================================================
// Movie Record
// =============================================================================

/// One row of the movie table.
///
/// Field names are the snake_case column names
/// (`num_raters`, `release_date`, ...), so the same struct reads the data
/// files and writes the JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Score on a 0-10 scale with one fractional digit (e.g. `9.7`)
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub num_raters: Option<i64>,
    #[serde(default)]
    pub quote: Option<String>,
    /// Slash-delimited: `"Lana Wachowski / Lilly Wachowski"`
    #[serde(default)]
    pub director: Option<String>,
    /// Comma-delimited: `"Tim Robbins, Morgan Freeman"`
    #[serde(default)]
    pub actors: Option<String>,
    /// Usually a year, but the source data also holds values like `"未知"`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Comma-delimited: `"Crime, Drama"`
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl MovieRecord {
    /// Create a record with only the required fields set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            rating: None,
            num_raters: None,
            quote: None,
            director: None,
            actors: None,
            release_date: None,
            genres: None,
            link: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_actors(mut self, actors: impl Into<String>) -> Self {
        self.actors = Some(actors.into());
        self
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = Some(genres.into());
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// A window over the full movie list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Number of records in the whole catalog, not in this page
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub movies: Vec<MovieRecord>,
}

// =============================================================================
// MovieCatalog - In-Memory Record Store
// =============================================================================

/// Holds every movie record in load order.
///
/// Load order matters: it is the "left-to-right scan" order the analytics
/// crate uses to break ranking ties, so records live in a `Vec` and the
/// `HashMap` only maps ids to positions.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) positions: HashMap<MovieId, usize>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, keeping their order
    ///
    /// A later record with an already-seen id replaces the earlier one in
    /// place; use [`MovieCatalog::validate`] to reject such input instead.
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert_movie(record);
        }
        catalog
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// All records in load order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Insert a movie, replacing any record with the same id
    pub fn insert_movie(&mut self, movie: MovieRecord) {
        match self.positions.get(&movie.id) {
            Some(&pos) => self.movies[pos] = movie,
            None => {
                self.positions.insert(movie.id, self.movies.len());
                self.movies.push(movie);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
