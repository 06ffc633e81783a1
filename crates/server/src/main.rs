//! Simple test harness for the analytics service.
//!
//! Loads a movie file, then runs every API query once against it and logs
//! the JSON bodies.
//!
//! Usage: `server <movies.json|movies.jsonl|movies.csv>`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use data_loader::MovieCatalog;
use server::{AnalyticsService, ApiRequest, QueryParams};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,server=debug,analytics=debug")
                }),
        )
        .init();

    info!("Starting movie stats service test harness");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: server <movies file>"))?;

    let catalog = MovieCatalog::load_from_file(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!("Catalog loaded: {} movies", catalog.len());

    let service = AnalyticsService::new(Arc::new(catalog));
    let params = QueryParams::new().with("limit", "10");

    let endpoints = [
        "movies",
        "movies/year/1994",
        "top_actors",
        "top_directors",
        "genre_counts",
        "movies_by_rating",
        "decade_distribution",
        "rating_stats",
    ];

    for endpoint in endpoints {
        let request = ApiRequest::parse(endpoint, &params, service.config())
            .ok_or_else(|| anyhow!("unknown endpoint {}", endpoint))?;
        match service.respond(request).await {
            Ok(response) => info!("/{} -> {}", endpoint, serde_json::to_string(&response)?),
            Err(e) => info!("/{} -> {} ({})", endpoint, e.status_code(), e),
        }
    }

    Ok(())
}
