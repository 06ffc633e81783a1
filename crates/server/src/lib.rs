//! Server crate for the movie statistics service.
//!
//! This crate contains the async service that answers analytics queries
//! against a shared movie store, plus the request parameter handling and
//! JSON response shapes of the API.

pub mod config;
pub mod error;
pub mod params;
pub mod responses;
pub mod orchestrator;

pub use config::{DEFAULT_QUERY_TIMEOUT, ServiceConfig};
pub use error::ServiceError;
pub use orchestrator::{AnalyticsService, ApiRequest, ApiResponse};
pub use params::QueryParams;
