//! Request parameter extraction.
//!
//! Query-string values arrive as text. A value that doesn't parse is
//! treated as missing and falls back to the parameter's default, it is
//! never an error.

use analytics::{DEFAULT_MAX_RATING, DEFAULT_MIN_RATING};
use std::collections::HashMap;

/// Raw query-string parameters of one request
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-decoded `(key, value)` pairs; a repeated key keeps its first value
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Integer parameter, `None` when absent or not an integer
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Float parameter, `None` when absent or not a number
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// `limit` for the ranking queries; absent or non-integer means no limit
    pub fn limit(&self) -> Option<i64> {
        self.get_int("limit")
    }

    /// `min_rating`, default 0
    pub fn min_rating(&self) -> f64 {
        self.get_float("min_rating").unwrap_or(DEFAULT_MIN_RATING)
    }

    /// `max_rating`, default 10
    pub fn max_rating(&self) -> f64 {
        self.get_float("max_rating").unwrap_or(DEFAULT_MAX_RATING)
    }

    /// `page`, default 1
    pub fn page(&self) -> i64 {
        self.get_int("page").unwrap_or(1)
    }

    /// `per_page`, default `default_per_page`
    pub fn per_page(&self, default_per_page: i64) -> i64 {
        self.get_int("per_page").unwrap_or(default_per_page)
    }
}
