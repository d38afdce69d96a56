//! Configuration for the Fetcher

use crate::backoff::RetryPolicy;
use crate::detector::BusyHeadingDetector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Well details page of the New Mexico Oil Conservation Division
pub const DEFAULT_ENDPOINT: &str =
    "https://wwwapps.emnrd.nm.gov/OCD/OCDPermitting/Data/WellDetails.aspx";

/// Configuration for the Fetcher
///
/// Every field has a serde default, so a `[fetcher]` section only needs to
/// name the values it changes.
///
/// # Examples
///
/// ```
/// use wells_fetcher::FetcherConfig;
///
/// let config = FetcherConfig::from_toml("max_attempts = 3").unwrap();
/// assert_eq!(config.max_attempts, 3);
/// assert_eq!(config.initial_delay_ms, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Document endpoint; the API number is sent as the `api` query parameter
    pub endpoint: String,

    /// Total attempts per API number, including the first
    /// Default: 5
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    /// Default: 1000
    pub initial_delay_ms: u64,

    /// Factor applied to the delay after each failed attempt
    /// Default: 2
    pub backoff_multiplier: u32,

    /// Per-request timeout (seconds)
    /// Default: 30
    pub request_timeout_secs: u64,

    /// User-Agent header sent upstream
    pub user_agent: String,

    /// CSS selector of the heading the busy page is recognised by
    /// Default: `h2`
    pub rate_limit_selector: String,

    /// Heading text of the busy page, compared case-insensitively
    /// Default: `Server Too Busy`
    pub rate_limit_phrase: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_attempts: 5,
            initial_delay_ms: 1000,
            backoff_multiplier: 2,
            request_timeout_secs: 30,
            user_agent: format!("wells/{}", env!("CARGO_PKG_VERSION")),
            rate_limit_selector: "h2".to_string(),
            rate_limit_phrase: "Server Too Busy".to_string(),
        }
    }
}

impl FetcherConfig {
    /// Get the initial backoff delay as a Duration
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.initial_delay(), self.backoff_multiplier)
    }

    /// Rate-limit detector described by this configuration
    pub fn detector(&self) -> BusyHeadingDetector {
        BusyHeadingDetector::new(&self.rate_limit_selector, &self.rate_limit_phrase)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if reqwest::Url::parse(&self.endpoint).is_err() {
            return Err(format!("endpoint is not a valid URL: {}", self.endpoint));
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.backoff_multiplier == 0 {
            return Err("backoff_multiplier must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if !wells_extractor::is_valid_selector(&self.rate_limit_selector) {
            return Err(format!(
                "rate_limit_selector is not a valid CSS selector: {}",
                self.rate_limit_selector
            ));
        }
        if self.rate_limit_phrase.trim().is_empty() {
            return Err("rate_limit_phrase must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
