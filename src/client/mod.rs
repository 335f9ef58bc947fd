//! HTTP client for the Trends endpoint family
//!
//! [`TrendsClient`] owns the reqwest plumbing shared by the widget exchange
//! and the four table fetchers: header construction with User-Agent
//! rotation, the anti-scraping envelope stripping, and status handling.
//! [`TrendsClient::query`] is the one-call entry point that runs the whole
//! validate/exchange/fetch cycle and bundles the six tables.

pub mod interest_by_region;
pub mod interest_over_time;
pub mod related;
pub mod widgets;

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Result, TrendsError};
use crate::models::TrendsBundle;
use crate::query::TrendsQuery;

/// Production host for the Trends endpoint family
pub const DEFAULT_BASE_URL: &str = "https://trends.google.com";

/// Envelope prefix on token-exchange (explore) responses
pub(crate) const EXPLORE_PREFIX: &str = ")]}'";

/// Envelope prefix on widget-data responses
pub(crate) const WIDGET_PREFIX: &str = ")]}',";

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Base URL of the Trends host; overridable for mock-server tests
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `GTRENDS_TIMEOUT_SECS`, `GTRENDS_BASE_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let timeout = std::env::var("GTRENDS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let base_url = std::env::var("GTRENDS_BASE_URL").unwrap_or(defaults.base_url);

        Self { timeout, base_url }
    }
}

/// Client for the Trends service
///
/// Stateless across calls: widgets are exchanged fresh for every query and
/// nothing is cached. The cookie store only carries the session cookies the
/// service sets on first contact.
pub struct TrendsClient {
    client: Client,
    base_url: String,
}

impl TrendsClient {
    /// Create a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `TrendsError::Http` if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from a configuration
    ///
    /// # Errors
    ///
    /// Returns `TrendsError::Http` if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client pointed at a custom base URL, for mock-server tests
    ///
    /// # Errors
    ///
    /// Returns `TrendsError::Http` if the HTTP client cannot be created.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Run one full query: exchange widgets, fetch all four tables, bundle
    ///
    /// The fetches run sequentially, one round trip at a time. A widget
    /// exchange failure is fatal for the whole call; so is any per-table
    /// failure after a successful exchange. The related-topics and
    /// related-queries tables come back empty (without a network call) when
    /// more than one keyword was requested.
    ///
    /// # Errors
    ///
    /// `Remote` for non-success HTTP statuses, `Parse` for envelope or
    /// schema mismatches, `Http` for transport failures.
    pub async fn query(&self, query: &TrendsQuery) -> Result<TrendsBundle> {
        info!(
            keywords = ?query.keywords(),
            geos = ?query.geos(),
            time = %query.time(),
            "running trends query"
        );

        let widgets = self.fetch_widgets(query).await?;
        let interest_over_time = self.interest_over_time(query, &widgets).await?;
        let (by_region, by_dma, by_city) = self.interest_by_region(query, &widgets).await?;
        let related_topics = self.related_topics(query, &widgets).await?;
        let related_queries = self.related_queries(query, &widgets).await?;

        Ok(TrendsBundle::new(
            interest_over_time,
            by_region,
            by_dma,
            by_city,
            related_topics,
            related_queries,
        ))
    }

    /// Issue one GET against an API path and return the raw body
    ///
    /// # Errors
    ///
    /// Returns `Remote { status }` for any non-2xx response.
    pub(crate) async fn get_api(
        &self,
        path: &str,
        hl: &str,
        params: &[(&str, String)],
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "trends api request");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(hl))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrendsError::Remote {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Strip an anti-scraping envelope prefix and parse the remaining JSON
    ///
    /// The prefix is fixed per endpoint; any deviation is a `Parse` error,
    /// never a speculative recovery.
    pub(crate) fn parse_enveloped<T: DeserializeOwned>(body: &str, prefix: &str) -> Result<T> {
        let rest = body.strip_prefix(prefix).ok_or_else(|| {
            TrendsError::parse(format!(
                "response body does not start with the {prefix:?} envelope prefix"
            ))
        })?;
        serde_json::from_str(rest.trim_start())
            .map_err(|e| TrendsError::parse(format!("envelope payload is not valid JSON: {e}")))
    }

    /// Build request headers with a rotated User-Agent
    fn build_headers(&self, hl: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static(self.random_user_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Ok(lang) = HeaderValue::from_str(&format!("{hl},en;q=0.8")) {
            headers.insert(ACCEPT_LANGUAGE, lang);
        }

        headers
    }

    /// Pick a random user agent from the pool
    fn random_user_agent(&self) -> &'static str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_envelope_stripping() {
        let body = ")]}'\n{\"widgets\":[]}";
        let parsed: Value = TrendsClient::parse_enveloped(body, EXPLORE_PREFIX).unwrap();
        assert!(parsed["widgets"].is_array());
    }

    #[test]
    fn test_widget_envelope_stripping() {
        let body = ")]}',\n{\"default\":{}}";
        let parsed: Value = TrendsClient::parse_enveloped(body, WIDGET_PREFIX).unwrap();
        assert!(parsed["default"].is_object());
    }

    #[test]
    fn test_missing_prefix_is_parse_error() {
        let err =
            TrendsClient::parse_enveloped::<Value>("{\"widgets\":[]}", EXPLORE_PREFIX).unwrap_err();
        assert!(matches!(err, TrendsError::Parse(_)));
    }

    #[test]
    fn test_prefix_with_garbage_payload_is_parse_error() {
        let err = TrendsClient::parse_enveloped::<Value>(")]}'\nnot json", EXPLORE_PREFIX)
            .unwrap_err();
        assert!(matches!(err, TrendsError::Parse(_)));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TrendsClient::with_base_url("http://localhost:9999/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_user_agent_rotation() {
        let client = TrendsClient::new().unwrap();
        let mut agents = std::collections::HashSet::new();
        for _ in 0..100 {
            let agent = client.random_user_agent();
            assert!(USER_AGENTS.contains(&agent));
            agents.insert(agent);
        }
        assert!(agents.len() > 1, "user agents should rotate");
    }
}
