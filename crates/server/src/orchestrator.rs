//! # Analytics Service
//!
//! Async front of the aggregation core. For every query it:
//! 1. Moves the work onto the blocking pool (`spawn_blocking`)
//! 2. Fetches one snapshot from the store
//! 3. Runs the aggregation over that snapshot
//! 4. Races all of it against the configured deadline
//!
//! On expiry the caller gets `ServiceError::Timeout` and the late result is
//! dropped; the aggregation does no I/O, so abandoning it is harmless.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument, warn};

use analytics::{Bucket, MovieAnalytics, RankedEntry, RatingStats};
use data_loader::{MovieRecord, MovieStore, Page};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::params::QueryParams;
use crate::responses::{
    convert_all, ActorCount, DecadeCount, DirectorCount, GenreCount, RatingStatsResponse,
};

pub type Result<T> = std::result::Result<T, ServiceError>;

/// One API request, parameters already extracted
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Movies { page: i64, per_page: i64 },
    MoviesByYear { year: String },
    TopActors { limit: Option<i64> },
    TopDirectors { limit: Option<i64> },
    GenreCounts,
    MoviesByRating { min_rating: f64, max_rating: f64 },
    DecadeDistribution,
    RatingStats,
}

impl ApiRequest {
    /// Map an endpoint name and its query parameters to a request
    ///
    /// Endpoints: `movies`, `movies/year/<year>`, `top_actors`,
    /// `top_directors`, `genre_counts`, `movies_by_rating`,
    /// `decade_distribution`, `rating_stats`. Returns `None` for anything
    /// else.
    pub fn parse(endpoint: &str, params: &QueryParams, config: &ServiceConfig) -> Option<Self> {
        let endpoint = endpoint.trim_matches('/');
        if let Some(year) = endpoint.strip_prefix("movies/year/") {
            return Some(ApiRequest::MoviesByYear {
                year: year.to_string(),
            });
        }
        let request = match endpoint {
            "movies" => ApiRequest::Movies {
                page: params.page(),
                per_page: params.per_page(config.default_per_page),
            },
            "top_actors" => ApiRequest::TopActors {
                limit: params.limit(),
            },
            "top_directors" => ApiRequest::TopDirectors {
                limit: params.limit(),
            },
            "genre_counts" => ApiRequest::GenreCounts,
            "movies_by_rating" => ApiRequest::MoviesByRating {
                min_rating: params.min_rating(),
                max_rating: params.max_rating(),
            },
            "decade_distribution" => ApiRequest::DecadeDistribution,
            "rating_stats" => ApiRequest::RatingStats,
            _ => return None,
        };
        Some(request)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::Movies { .. } => "movies",
            ApiRequest::MoviesByYear { .. } => "movies_by_year",
            ApiRequest::TopActors { .. } => "top_actors",
            ApiRequest::TopDirectors { .. } => "top_directors",
            ApiRequest::GenreCounts => "genre_counts",
            ApiRequest::MoviesByRating { .. } => "movies_by_rating",
            ApiRequest::DecadeDistribution => "decade_distribution",
            ApiRequest::RatingStats => "rating_stats",
        }
    }
}

/// Response body of any [`ApiRequest`], serialized without a wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Page(Page),
    Movies(Vec<MovieRecord>),
    Actors(Vec<ActorCount>),
    Directors(Vec<DirectorCount>),
    Genres(Vec<GenreCount>),
    Decades(Vec<DecadeCount>),
    RatingStats(RatingStatsResponse),
}

/// Answers analytics queries against a shared store
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn MovieStore>,
    config: ServiceConfig,
}

impl AnalyticsService {
    /// Create a service with the default configuration
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: Arc<dyn MovieStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run `query` over a fresh snapshot on the blocking pool, under the deadline
    async fn run<T, F>(&self, name: &'static str, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&MovieAnalytics) -> T + Send + 'static,
    {
        let start_time = Instant::now();
        let store = self.store.clone();
        let parallel_threshold = self.config.parallel_threshold;

        let task = tokio::task::spawn_blocking(move || -> Result<T> {
            let analytics = MovieAnalytics::from_store(store.as_ref())?
                .with_parallel_threshold(parallel_threshold);
            Ok(query(&analytics))
        });

        let result = match tokio::time::timeout(self.config.query_timeout, task).await {
            Ok(joined) => joined.map_err(|e| ServiceError::TaskFailed(e.to_string()))?,
            Err(_) => {
                warn!(
                    "Query {} exceeded deadline of {:?}, discarding result",
                    name, self.config.query_timeout
                );
                return Err(ServiceError::Timeout {
                    query: name,
                    after: self.config.query_timeout,
                });
            }
        };

        info!("Query {} finished in {:.2?}", name, start_time.elapsed());
        result
    }

    /// One page of the raw movie list
    pub async fn list_movies(&self, page: i64, per_page: i64) -> Result<Page> {
        let store = self.store.clone();
        let task = tokio::task::spawn_blocking(move || store.fetch_page(page, per_page));
        match tokio::time::timeout(self.config.query_timeout, task).await {
            Ok(joined) => Ok(joined.map_err(|e| ServiceError::TaskFailed(e.to_string()))??),
            Err(_) => Err(ServiceError::Timeout {
                query: "movies",
                after: self.config.query_timeout,
            }),
        }
    }

    pub async fn movies_by_year(&self, year: impl Into<String>) -> Result<Vec<MovieRecord>> {
        let year = year.into();
        self.run("movies_by_year", move |a| a.list_by_year(&year)).await
    }

    pub async fn top_actors(&self, limit: Option<i64>) -> Result<Vec<RankedEntry>> {
        self.run("top_actors", move |a| a.top_actors(limit)).await
    }

    pub async fn top_directors(&self, limit: Option<i64>) -> Result<Vec<RankedEntry>> {
        self.run("top_directors", move |a| a.top_directors(limit)).await
    }

    pub async fn genre_counts(&self) -> Result<Vec<RankedEntry>> {
        self.run("genre_counts", |a| a.genre_counts()).await
    }

    pub async fn movies_by_rating(&self, min_rating: f64, max_rating: f64) -> Result<Vec<MovieRecord>> {
        self.run("movies_by_rating", move |a| {
            a.movies_by_rating(min_rating, max_rating)
        })
        .await
    }

    pub async fn decade_distribution(&self) -> Result<Vec<Bucket>> {
        self.run("decade_distribution", |a| a.decade_distribution()).await
    }

    pub async fn rating_distribution(&self) -> Result<Vec<Bucket>> {
        self.run("rating_distribution", |a| a.rating_distribution()).await
    }

    pub async fn rating_stats(&self) -> Result<RatingStats> {
        self.run("rating_stats", |a| a.rating_stats()).await
    }

    /// Answer a request with its API response body
    #[instrument(skip(self, request), fields(request = request.name()))]
    pub async fn respond(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = match request {
            ApiRequest::Movies { page, per_page } => {
                ApiResponse::Page(self.list_movies(page, per_page).await?)
            }
            ApiRequest::MoviesByYear { year } => {
                ApiResponse::Movies(self.movies_by_year(year).await?)
            }
            ApiRequest::TopActors { limit } => {
                ApiResponse::Actors(convert_all(self.top_actors(limit).await?))
            }
            ApiRequest::TopDirectors { limit } => {
                ApiResponse::Directors(convert_all(self.top_directors(limit).await?))
            }
            ApiRequest::GenreCounts => ApiResponse::Genres(convert_all(self.genre_counts().await?)),
            ApiRequest::MoviesByRating {
                min_rating,
                max_rating,
            } => ApiResponse::Movies(self.movies_by_rating(min_rating, max_rating).await?),
            ApiRequest::DecadeDistribution => {
                ApiResponse::Decades(convert_all(self.decade_distribution().await?))
            }
            ApiRequest::RatingStats => ApiResponse::RatingStats(self.rating_stats().await?.into()),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataLoadError, MovieCatalog};
    use std::time::Duration;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_store() -> Arc<dyn MovieStore> {
        Arc::new(MovieCatalog::from_records(vec![
            MovieRecord::new(1, "肖申克的救赎")
                .with_rating(9.7)
                .with_director("弗兰克·德拉邦特")
                .with_actors("蒂姆·罗宾斯, 摩根·弗里曼")
                .with_release_date("1994")
                .with_genres("犯罪, 剧情"),
            MovieRecord::new(2, "霸王别姬")
                .with_rating(9.6)
                .with_director("陈凯歌")
                .with_actors("张国荣, 张丰毅, 巩俐")
                .with_release_date("1993")
                .with_genres("剧情, 爱情, 同性"),
            MovieRecord::new(3, "阿甘正传")
                .with_rating(9.5)
                .with_director("罗伯特·泽米吉斯")
                .with_actors("汤姆·汉克斯, 罗宾·怀特")
                .with_release_date("1994")
                .with_genres("剧情, 爱情"),
            MovieRecord::new(4, "千与千寻")
                .with_rating(9.4)
                .with_director("宫崎骏")
                .with_actors("柊瑠美, 入野自由")
                .with_release_date("2001")
                .with_genres("剧情, 动画, 奇幻"),
            MovieRecord::new(5, "未上映").with_release_date("未知"),
        ]))
    }

    struct SlowStore {
        delay: Duration,
    }

    impl MovieStore for SlowStore {
        fn fetch_all_movies(&self) -> data_loader::Result<Vec<MovieRecord>> {
            std::thread::sleep(self.delay);
            Ok(Vec::new())
        }
    }

    struct OfflineStore;

    impl MovieStore for OfflineStore {
        fn fetch_all_movies(&self) -> data_loader::Result<Vec<MovieRecord>> {
            Err(DataLoadError::StoreUnavailable("connection refused".to_string()))
        }
    }

    // ============================================================================
    // Unit Tests: queries
    // ============================================================================

    #[tokio::test]
    async fn test_genre_counts() {
        let service = AnalyticsService::new(build_test_store());
        let genres = service.genre_counts().await.unwrap();

        assert_eq!(genres[0], RankedEntry::new("剧情", 4));
        assert_eq!(genres[1], RankedEntry::new("爱情", 2));
        assert_eq!(genres.len(), 6);
    }

    #[tokio::test]
    async fn test_top_actors_limit() {
        let service = AnalyticsService::new(build_test_store());
        assert_eq!(service.top_actors(Some(3)).await.unwrap().len(), 3);
        assert_eq!(service.top_actors(Some(0)).await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_movies_by_year_and_rating() {
        let service = AnalyticsService::new(build_test_store());

        let ids: Vec<_> = service
            .movies_by_year("1994")
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let by_rating = service.movies_by_rating(9.5, 9.6).await.unwrap();
        assert_eq!(by_rating.len(), 2);
    }

    #[tokio::test]
    async fn test_decades_and_rating_stats() {
        let service = AnalyticsService::new(build_test_store());

        let decades = service.decade_distribution().await.unwrap();
        assert_eq!(decades, vec![Bucket::new("1990s", 3), Bucket::new("2000s", 1)]);

        let stats = service.rating_stats().await.unwrap();
        assert!((stats.average_rating - 9.55).abs() < 1e-9);
        assert_eq!(stats.highest_rated.unwrap().title, "肖申克的救赎");
        assert_eq!(stats.lowest_rated.unwrap().title, "千与千寻");
        assert_eq!(service.rating_distribution().await.unwrap()[9].count, 4);
    }

    #[tokio::test]
    async fn test_list_movies_pages() {
        let service = AnalyticsService::new(build_test_store());
        let page = service.list_movies(2, 2).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].id, 3);
    }

    // ============================================================================
    // Unit Tests: failure paths
    // ============================================================================

    #[tokio::test]
    async fn test_query_times_out() {
        let store: Arc<dyn MovieStore> = Arc::new(SlowStore {
            delay: Duration::from_millis(300),
        });
        let config = ServiceConfig::default().with_query_timeout(Duration::from_millis(20));
        let service = AnalyticsService::with_config(store, config);

        let result = service.top_actors(None).await;
        match result {
            Err(ServiceError::Timeout { query, .. }) => assert_eq!(query, "top_actors"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let service = AnalyticsService::new(Arc::new(OfflineStore));
        let err = service.rating_stats().await.unwrap_err();
        assert_eq!(err.status_code(), 503);

        let err = service.list_movies(1, 10).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
    }

    // ============================================================================
    // Integration Tests: request parsing and response bodies
    // ============================================================================

    #[test]
    fn test_parse_requests() {
        let config = ServiceConfig::default();
        let params = QueryParams::new().with("limit", "5");

        assert_eq!(
            ApiRequest::parse("/top_actors", &params, &config),
            Some(ApiRequest::TopActors { limit: Some(5) })
        );
        assert_eq!(
            ApiRequest::parse("movies/year/1994", &QueryParams::new(), &config),
            Some(ApiRequest::MoviesByYear {
                year: "1994".to_string()
            })
        );
        assert_eq!(
            ApiRequest::parse("movies", &QueryParams::new(), &config),
            Some(ApiRequest::Movies {
                page: 1,
                per_page: 10
            })
        );
        assert_eq!(
            ApiRequest::parse("movies_by_rating", &QueryParams::new().with("min_rating", "x"), &config),
            Some(ApiRequest::MoviesByRating {
                min_rating: 0.0,
                max_rating: 10.0
            })
        );
        assert_eq!(ApiRequest::parse("login", &params, &config), None);
    }

    #[tokio::test]
    async fn test_respond_top_directors_body() {
        let service = AnalyticsService::new(build_test_store());
        let response = service
            .respond(ApiRequest::TopDirectors { limit: Some(1) })
            .await
            .unwrap();

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, serde_json::json!([{"director": "弗兰克·德拉邦特", "count": 1}]));
    }

    #[tokio::test]
    async fn test_respond_rating_stats_body() {
        let service = AnalyticsService::new(build_test_store());
        let response = service.respond(ApiRequest::RatingStats).await.unwrap();

        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains(r#""rating_distribution":{"0-1":0,"1-2":0"#));
        assert!(text.contains(r#""9-10":4,"10-11":0}"#));
        assert!(text.contains(r#""highest_rated":{"title":"肖申克的救赎","rating":9.7}"#));
    }

    #[tokio::test]
    async fn test_respond_empty_store() {
        let service = AnalyticsService::new(Arc::new(MovieCatalog::new()));
        let response = service.respond(ApiRequest::RatingStats).await.unwrap();

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["average_rating"], serde_json::json!(0.0));
        assert_eq!(body["highest_rated"], serde_json::json!({}));
        assert_eq!(body["lowest_rated"], serde_json::json!({}));
    }
}
