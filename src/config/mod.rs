//! Configuration module for the court dashboard client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ClientError;
use crate::query::CachePolicy;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend, including the `/api` prefix
    pub api_url: String,
    /// File holding the bearer token between runs
    pub token_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long a cached query result is served without refetching
    pub cache_stale_after: Duration,
    /// Idle time after which a cached query result is evicted
    pub cache_evict_after: Duration,
    /// Maximum number of cached query results
    pub cache_max_entries: usize,
    /// Extra attempts for a query after a retryable failure
    pub query_retries: u32,
    /// Pause between query attempts
    pub query_retry_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            token_path: PathBuf::from("./data/token"),
            log_level: "info".to_string(),
            request_timeout: Duration::from_secs(30),
            cache_stale_after: Duration::from_secs(300),
            cache_evict_after: Duration::from_secs(1800),
            cache_max_entries: 256,
            query_retries: 1,
            query_retry_delay: Duration::from_millis(1000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("COURT_API_URL").unwrap_or(defaults.api_url);

        let token_path = env::var("COURT_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_path);

        let log_level = env::var("COURT_LOG_LEVEL").unwrap_or(defaults.log_level);

        let request_timeout = Duration::from_secs(parse_var("COURT_REQUEST_TIMEOUT_SECS", 30)?);
        let cache_stale_after = Duration::from_secs(parse_var("COURT_CACHE_STALE_SECS", 300)?);
        let cache_evict_after = Duration::from_secs(parse_var("COURT_CACHE_EVICT_SECS", 1800)?);
        let cache_max_entries = parse_var("COURT_CACHE_MAX_ENTRIES", 256)?;
        let query_retries = parse_var("COURT_QUERY_RETRIES", 1)?;
        let query_retry_delay =
            Duration::from_millis(parse_var("COURT_QUERY_RETRY_DELAY_MS", 1000)?);

        Ok(Self {
            api_url,
            token_path,
            log_level,
            request_timeout,
            cache_stale_after,
            cache_evict_after,
            cache_max_entries,
            query_retries,
            query_retry_delay,
        })
    }

    /// Retention policy for the query cache.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            stale_after: self.cache_stale_after,
            evict_after: self.cache_evict_after,
            max_entries: self.cache_max_entries,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ClientError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::Config(format!("Invalid {} value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share one test so they never race on the process environment.
    #[test]
    fn test_env_config() {
        for name in [
            "COURT_API_URL",
            "COURT_TOKEN_PATH",
            "COURT_LOG_LEVEL",
            "COURT_REQUEST_TIMEOUT_SECS",
            "COURT_CACHE_STALE_SECS",
            "COURT_CACHE_EVICT_SECS",
            "COURT_CACHE_MAX_ENTRIES",
            "COURT_QUERY_RETRIES",
            "COURT_QUERY_RETRY_DELAY_MS",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.token_path, PathBuf::from("./data/token"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_policy().stale_after, Duration::from_secs(300));
        assert_eq!(config.cache_policy().max_entries, 256);
        assert_eq!(config.query_retries, 1);

        env::set_var("COURT_QUERY_RETRIES", "three");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.error_code(), crate::errors::codes::CONFIG_ERROR);
        env::remove_var("COURT_QUERY_RETRIES");
    }
}
