//! HTTP transport abstraction
//!
//! The fetcher owns exactly one [`Transport`]. Production code uses
//! [`HttpTransport`] (one pooled `reqwest::Client`); tests script responses
//! with [`MockTransport`].

use crate::config::FetcherConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::debug;
use wells_domain::ApiNumber;

/// Retrieves the raw details page for one API number
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET request and return the body of a successful response
    async fn get(&self, api: &ApiNumber) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport against the configured endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// Build the client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the endpoint is not a
    /// valid URL or the client cannot be constructed.
    pub fn new(config: &FetcherConfig) -> Result<Self, TransportError> {
        let endpoint = reqwest::Url::parse(&config.endpoint).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid endpoint {}: {}", config.endpoint, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn url_for(&self, api: &ApiNumber) -> reqwest::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("api", api.as_str());
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, api: &ApiNumber) -> Result<String, TransportError> {
        let url = self.url_for(api);
        debug!(api = %api, url = %url, "GET");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// One request seen by a [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// API number requested
    pub api: ApiNumber,
    /// When the request was issued (tokio clock, so paused time is honoured)
    pub at: Instant,
}

#[derive(Default)]
struct MockState {
    script: VecDeque<Result<String, TransportError>>,
    pages: HashMap<ApiNumber, String>,
    requests: Vec<RecordedRequest>,
}

/// Scripted transport for tests
///
/// Responses are served from, in order: the script queue, per-API pages, and
/// finally the fallback body. Every call is recorded with its timestamp.
/// Clones share state, so a test can keep a handle after moving one into a
/// fetcher.
#[derive(Clone)]
pub struct MockTransport {
    fallback: Arc<str>,
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Serve `fallback` whenever nothing more specific is queued
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: Arc::from(fallback.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue a response for the next unscripted call
    pub fn push(&self, response: Result<String, TransportError>) -> &Self {
        self.lock().script.push_back(response);
        self
    }

    /// Queue the same response `times` times
    pub fn push_n(&self, response: Result<String, TransportError>, times: usize) -> &Self {
        let mut state = self.lock();
        for _ in 0..times {
            state.script.push_back(response.clone());
        }
        drop(state);
        self
    }

    /// Serve `body` for `api` once the script queue is empty
    pub fn with_page(self, api: &ApiNumber, body: impl Into<String>) -> Self {
        self.lock().pages.insert(api.clone(), body.into());
        self
    }

    /// Every request issued so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests issued so far
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, api: &ApiNumber) -> Result<String, TransportError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            api: api.clone(),
            at: Instant::now(),
        });

        if let Some(response) = state.script.pop_front() {
            return response;
        }

        Ok(state
            .pages
            .get(api)
            .cloned()
            .unwrap_or_else(|| self.fallback.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(s: &str) -> ApiNumber {
        ApiNumber::parse(s).unwrap()
    }

    #[test]
    fn test_url_carries_api_parameter() {
        let transport = HttpTransport::new(&FetcherConfig::default()).unwrap();
        let url = transport.url_for(&api("30-015-20001"));

        assert!(url.as_str().starts_with(crate::config::DEFAULT_ENDPOINT));
        assert_eq!(url.query(), Some("api=30-015-20001"));
    }

    #[test]
    fn test_url_encodes_api() {
        let transport = HttpTransport::new(&FetcherConfig::default()).unwrap();
        let url = transport.url_for(&api("a b&c"));
        assert_eq!(url.query(), Some("api=a+b%26c"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = FetcherConfig {
            endpoint: "::not a url::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_serves_script_then_pages_then_fallback() {
        let first = api("1");
        let mock = MockTransport::new("fallback").with_page(&first, "page one");
        mock.push(Err(TransportError::Status(503)));

        assert_eq!(mock.get(&first).await, Err(TransportError::Status(503)));
        assert_eq!(mock.get(&first).await.unwrap(), "page one");
        assert_eq!(mock.get(&api("2")).await.unwrap(), "fallback");
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_clones_share_state() {
        let mock = MockTransport::new("ok");
        let handle = mock.clone();
        mock.get(&api("1")).await.unwrap();
        assert_eq!(handle.requests()[0].api, api("1"));
    }
}
