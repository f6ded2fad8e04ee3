//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.wordnik.com/v4";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_QUIZ_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
    /// Base URL of the dictionary service.
    pub api_base_url: String,
    /// API key for the dictionary service. Empty means every lookup
    /// degrades to the fallback definition; ingestion still works.
    pub api_key: String,
    /// Timeout applied to each definition lookup.
    pub lookup_timeout: Duration,
    /// Default number of quiz items.
    pub quiz_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("WORDWEEK_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());

        let api_base_url =
            std::env::var("WORDWEEK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = std::env::var("WORDWEEK_API_KEY").unwrap_or_default();

        let timeout_secs = std::env::var("WORDWEEK_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let quiz_size = std::env::var("WORDWEEK_QUIZ_SIZE")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_QUIZ_SIZE);

        Self {
            db_path,
            api_base_url,
            api_key,
            lookup_timeout: Duration::from_secs(timeout_secs),
            quiz_size,
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("wordweek").join("wordweek.db"))
        .unwrap_or_else(|| PathBuf::from("wordweek.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Environment mutation is process-global; only read the defaults here.
        let config = Config::from_env();
        assert!(!config.api_base_url.is_empty());
        assert!(config.lookup_timeout >= Duration::from_secs(1));
        assert!(config.quiz_size > 0);
    }
}
