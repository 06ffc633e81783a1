//! The storage collaborator seen by the analytics core.
//!
//! The core needs exactly one capability from storage: a full, consistent
//! snapshot of every movie record, in a stable order.

use crate::error::Result;
use crate::types::{MovieCatalog, MovieRecord, Page};
use std::sync::Arc;

/// Source of movie record snapshots.
///
/// `Send + Sync` so one store can back concurrent requests behind an `Arc`.
pub trait MovieStore: Send + Sync {
    /// Every record, in the store's canonical order
    fn fetch_all_movies(&self) -> Result<Vec<MovieRecord>>;

    /// One page of the raw movie list
    ///
    /// The default implementation pages over a full snapshot.
    fn fetch_page(&self, page: i64, per_page: i64) -> Result<Page> {
        Ok(MovieCatalog::from_records(self.fetch_all_movies()?).paginate(page, per_page))
    }
}

impl MovieStore for MovieCatalog {
    fn fetch_all_movies(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.movies.clone())
    }

    fn fetch_page(&self, page: i64, per_page: i64) -> Result<Page> {
        Ok(self.paginate(page, per_page))
    }
}

impl<S: MovieStore + ?Sized> MovieStore for Arc<S> {
    fn fetch_all_movies(&self) -> Result<Vec<MovieRecord>> {
        (**self).fetch_all_movies()
    }

    fn fetch_page(&self, page: i64, per_page: i64) -> Result<Page> {
        (**self).fetch_page(page, per_page)
    }
}
