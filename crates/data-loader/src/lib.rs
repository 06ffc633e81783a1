//! # Data Loader Crate
//!
//! This crate loads movie records and serves them to the analytics core.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord`, `MovieCatalog`, `Page`
//! - **parser**: Parse JSON / JSON-lines / CSV record files
//! - **catalog**: Load, validate and paginate a `MovieCatalog`
//! - **store**: The `MovieStore` trait the rest of the system fetches through
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{MovieCatalog, MovieStore};
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_file(Path::new("data/movies.json"))?;
//! let snapshot = catalog.fetch_all_movies()?;
//! let first_page = catalog.paginate(1, 10);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod catalog;
pub mod store;

// Re-export commonly used types for convenience
pub use catalog::DEFAULT_PER_PAGE;
pub use error::{DataLoadError, Result};
pub use parser::RecordFormat;
pub use store::MovieStore;
pub use types::{MovieCatalog, MovieId, MovieRecord, Page};
