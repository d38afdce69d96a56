//! Rate-aware fetch loop

use crate::backoff::{AttemptState, Backoff, RetryPolicy};
use crate::config::FetcherConfig;
use crate::detector::{BusyHeadingDetector, RateLimitDetector};
use crate::error::{AttemptFailure, FetchError, TransportError};
use crate::transport::{HttpTransport, Transport};
use tracing::{debug, warn};
use wells_domain::ApiNumber;

/// Retrieves well details pages, retrying through upstream throttling
///
/// Generic over the transport and the rate-limit detector so either can be
/// swapped in tests.
pub struct Fetcher<T, D = BusyHeadingDetector> {
    transport: T,
    detector: D,
    policy: RetryPolicy,
}

impl Fetcher<HttpTransport> {
    /// Build an HTTP fetcher from configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Fetcher::with_detector(transport, config.detector(), config.retry_policy()))
    }
}

impl<T: Transport> Fetcher<T> {
    /// Fetcher using the default busy-page detector
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_detector(transport, BusyHeadingDetector::default(), policy)
    }
}

impl<T: Transport, D: RateLimitDetector> Fetcher<T, D> {
    /// Fetcher with a custom rate-limit detector
    pub fn with_detector(transport: T, detector: D, policy: RetryPolicy) -> Self {
        Self {
            transport,
            detector,
            policy,
        }
    }

    /// Retry policy in effect
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the details page for `api`
    ///
    /// Rate-limited responses and transient transport failures are retried
    /// according to the policy. Non-transient failures return
    /// [`FetchError::Network`] at once.
    pub async fn fetch(&self, api: &ApiNumber) -> Result<String, FetchError> {
        let mut backoff = Backoff::new(self.policy.clone());

        loop {
            let attempt = backoff.attempt();

            let failure = match self.transport.get(api).await {
                Ok(body) if !self.detector.is_rate_limited(&body) => {
                    backoff.succeed();
                    debug!(api = %api, attempt, bytes = body.len(), "fetched");
                    return Ok(body);
                }
                Ok(_) => AttemptFailure::RateLimited,
                Err(e) if e.is_transient() => AttemptFailure::Transport(e),
                Err(e) => {
                    warn!(api = %api, attempt, error = %e, "non-transient failure, not retrying");
                    return Err(FetchError::Network(e));
                }
            };

            match backoff.fail() {
                AttemptState::Backoff { attempt, delay } => {
                    warn!(
                        api = %api,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        reason = %failure,
                        "attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    backoff.resume();
                }
                AttemptState::Exhausted(attempts) => {
                    warn!(api = %api, attempts, reason = %failure, "retries exhausted");
                    return Err(FetchError::Exhausted {
                        attempts,
                        last: failure,
                    });
                }
                // fail() only leaves Attempting for Backoff or Exhausted
                AttemptState::Attempting(_) | AttemptState::Succeeded(_) => {
                    return Err(FetchError::Exhausted {
                        attempts: backoff.attempt(),
                        last: failure,
                    });
                }
            }
        }
    }
}
