//! Definition lookup against the remote dictionary service.
//!
//! Lookups are best-effort: any failure (transport, status, shape, timeout)
//! degrades to a fixed placeholder instead of surfacing an error, so a dead
//! network never blocks ingestion.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

/// Stored in place of a definition when the lookup fails.
pub const FALLBACK_DEFINITION: &str = "Definition unavailable.";

/// What went wrong during a lookup. Only ever observed as the `Degraded`
/// reason; never propagated past the fetcher.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}

/// Outcome of a lookup. Callers store `into_text()`; the degraded reason
/// exists for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Fetched(String),
    Degraded { reason: String },
}

impl Lookup {
    /// The text to store: the fetched definition, or the placeholder.
    pub fn into_text(self) -> String {
        match self {
            Lookup::Fetched(text) => text,
            Lookup::Degraded { .. } => FALLBACK_DEFINITION.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Lookup::Degraded { .. })
    }
}

#[derive(Debug, Deserialize)]
struct DefinitionEntry {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the dictionary service.
pub struct DefinitionFetcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DefinitionFetcher {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.lookup_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetcher with explicit settings, for tests.
    pub fn with_endpoint(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Look up a word's definition. Never fails; errors degrade.
    pub async fn lookup(&self, word: &str) -> Lookup {
        match self.fetch(word).await {
            Ok(text) => Lookup::Fetched(text),
            Err(e) => {
                warn!(word, error = %e, "definition lookup degraded");
                Lookup::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn fetch(&self, word: &str) -> Result<String, LookupError> {
        let url = format!("{}/word.json/{}/definitions", self.base_url, word);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1"), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus(status));
        }

        let entries: Vec<DefinitionEntry> = response.json().await?;
        let first = entries.first().ok_or(LookupError::Shape("empty result list"))?;

        let text = first
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(LookupError::Shape("missing text field"))?;

        Ok(text.to_string())
    }
}
