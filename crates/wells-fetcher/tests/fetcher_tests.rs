//! Retry timing tests against a scripted transport
//!
//! Tokio time is paused, so the backoff schedule is observed exactly through
//! the timestamps the mock records.

use std::time::Duration;
use wells_domain::ApiNumber;
use wells_fetcher::{
    AttemptFailure, FetchError, Fetcher, MockTransport, RecordedRequest, RetryPolicy,
    TransportError,
};

const BUSY: &str = "<!DOCTYPE html><html><head><title>Server Too Busy</title></head>\
                    <body><h1>Server Error in '/' Application.</h1>\
                    <h2> Server Too Busy </h2></body></html>";

fn details(marker: &str) -> String {
    format!("<html><body><h2>Well Details</h2><p>{}</p></body></html>", marker)
}

fn api() -> ApiNumber {
    ApiNumber::parse("30-015-20001").unwrap()
}

fn gaps(requests: &[RecordedRequest]) -> Vec<Duration> {
    requests.windows(2).map(|w| w[1].at - w[0].at).collect()
}

fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|s| Duration::from_secs(*s)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_success_on_fifth_attempt() {
    let mock = MockTransport::new(details("fifth"));
    mock.push_n(Ok(BUSY.to_string()), 4);
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    let body = fetcher.fetch(&api()).await.unwrap();

    assert!(body.contains("fifth"));
    let requests = mock.requests();
    assert_eq!(requests.len(), 5);
    assert_eq!(gaps(&requests), secs(&[1, 2, 4, 8]));
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_without_sixth_request() {
    let mock = MockTransport::new(BUSY);
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    let started = tokio::time::Instant::now();
    let err = fetcher.fetch(&api()).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Exhausted {
            attempts: 5,
            last: AttemptFailure::RateLimited
        }
    );
    assert_eq!(mock.request_count(), 5);
    // 1 + 2 + 4 + 8; nothing is slept after the final attempt
    assert_eq!(started.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_transient_errors_share_the_schedule() {
    let mock = MockTransport::new(details("ok"));
    mock.push(Err(TransportError::Timeout("deadline".into())))
        .push(Ok(BUSY.to_string()))
        .push(Err(TransportError::Status(503)));
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    let body = fetcher.fetch(&api()).await.unwrap();

    assert!(body.contains("ok"));
    assert_eq!(gaps(&mock.requests()), secs(&[1, 2, 4]));
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_reports_last_failure() {
    let mock = MockTransport::new(details("never"));
    mock.push_n(Ok(BUSY.to_string()), 4)
        .push(Err(TransportError::Connect("refused".into())));
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    let err = fetcher.fetch(&api()).await.unwrap_err();

    assert_eq!(
        err,
        FetchError::Exhausted {
            attempts: 5,
            last: AttemptFailure::Transport(TransportError::Connect("refused".into()))
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_not_found_is_not_retried() {
    let mock = MockTransport::new(details("unused"));
    mock.push(Ok(BUSY.to_string()))
        .push(Err(TransportError::Status(404)));
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    let err = fetcher.fetch(&api()).await.unwrap_err();

    assert_eq!(err, FetchError::Network(TransportError::Status(404)));
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_schedule_restarts_per_api_number() {
    let first = api();
    let second = ApiNumber::parse("30-015-20002").unwrap();
    let mock = MockTransport::new(details("ok"));
    mock.push_n(Ok(BUSY.to_string()), 2);
    let fetcher = Fetcher::new(mock.clone(), RetryPolicy::default());

    fetcher.fetch(&first).await.unwrap();
    mock.push(Ok(BUSY.to_string()));
    fetcher.fetch(&second).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 5);
    // first: busy, busy, ok (1s, 2s); second: busy, ok (1s again)
    assert_eq!(gaps(&requests[..3]), secs(&[1, 2]));
    assert_eq!(gaps(&requests[3..]), secs(&[1]));
    assert!(requests[3..].iter().all(|r| r.api == second));
}
