//! Wells Fetcher
//!
//! Retrieves well details pages from a rate-limited upstream.
//!
//! # Architecture
//!
//! ```text
//! Fetcher ─┬─ Transport          (HTTP GET; HttpTransport or MockTransport)
//!          ├─ RateLimitDetector  (content sniffing: "is this the busy page?")
//!          └─ Backoff            (Attempting → Backoff → … → Succeeded | Exhausted)
//! ```
//!
//! The upstream signals throttling with a "busy" page rather than a status
//! code, so every successful response is inspected before it is accepted.
//! Rate-limited responses and transient transport failures share one retry
//! budget and one exponential schedule (1s, 2s, 4s, 8s by default).
//!
//! # Examples
//!
//! ```
//! use wells_domain::ApiNumber;
//! use wells_fetcher::{Fetcher, MockTransport, RetryPolicy};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = MockTransport::new("<html><body>ok</body></html>");
//! let fetcher = Fetcher::new(transport, RetryPolicy::default());
//!
//! let page = fetcher.fetch(&ApiNumber::parse("30-015-1").unwrap()).await.unwrap();
//! assert!(page.contains("ok"));
//! # }
//! ```

#![warn(missing_docs)]

mod backoff;
mod config;
mod detector;
mod error;
mod fetcher;
mod transport;

pub use backoff::{AttemptState, Backoff, RetryPolicy};
pub use config::FetcherConfig;
pub use detector::{BusyHeadingDetector, RateLimitDetector};
pub use error::{AttemptFailure, FetchError, TransportError};
pub use fetcher::Fetcher;
pub use transport::{HttpTransport, MockTransport, RecordedRequest, Transport};
