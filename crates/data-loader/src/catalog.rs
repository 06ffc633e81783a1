//! MovieCatalog loading, validation and pagination.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Page size used when the caller doesn't ask for one (or asks for < 1)
pub const DEFAULT_PER_PAGE: usize = 10;

impl MovieCatalog {
    /// Load a catalog from a record file
    ///
    /// Steps:
    /// 1. Parse the file (format picked by extension)
    /// 2. Validate the records
    /// 3. Insert them in file order
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie records from {}", path.display());

        let movies = parser::parse_movies(path)?;
        Self::validate(&movies)?;

        let catalog = Self::from_records(movies);
        info!("Loaded {} movies", catalog.len());
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - No two records share an id
    /// - Ratings, when present, are finite and not negative
    pub fn validate(movies: &[MovieRecord]) -> Result<()> {
        let mut seen = HashSet::with_capacity(movies.len());
        for movie in movies {
            if !seen.insert(movie.id) {
                return Err(DataLoadError::DuplicateId { id: movie.id });
            }
            if let Some(rating) = movie.rating {
                if !rating.is_finite() || rating < 0.0 {
                    return Err(DataLoadError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Return one page of the movie list
    ///
    /// `page` is 1-based. Out-of-range input is clamped instead of rejected:
    /// a page below 1 becomes page 1, a `per_page` below 1 becomes
    /// [`DEFAULT_PER_PAGE`], and a page past the end is simply empty.
    pub fn paginate(&self, page: i64, per_page: i64) -> Page {
        let page = if page < 1 { 1 } else { page as usize };
        let per_page = if per_page < 1 {
            DEFAULT_PER_PAGE
        } else {
            per_page as usize
        };

        let start = (page - 1).saturating_mul(per_page);
        let movies = self
            .movies
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Page {
            total: self.movies.len(),
            page,
            per_page,
            movies,
        }
    }
}
