//! Retry state machine with exponential backoff
//!
//! ```text
//! Attempting(n) ──succeed──▶ Succeeded(n)
//!      │
//!     fail
//!      ├── n < max ──▶ Backoff(n, delay) ──resume──▶ Attempting(n + 1)
//!      └── n = max ──▶ Exhausted(n)
//! ```
//!
//! No I/O happens here; the fetcher sleeps for the delay a `Backoff` state
//! carries. That keeps the schedule testable on its own.

use std::time::Duration;

/// How many attempts to make and how long to wait between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least 1)
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub initial_delay: Duration,

    /// Factor applied to the delay after every failed attempt
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is clamped to at least 1
    pub fn new(max_attempts: u32, initial_delay: Duration, multiplier: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            multiplier,
        }
    }

    /// Delays slept between consecutive attempts when every attempt fails
    ///
    /// ```
    /// use std::time::Duration;
    /// use wells_fetcher::RetryPolicy;
    ///
    /// let secs: Vec<u64> = RetryPolicy::default().schedule().iter().map(Duration::as_secs).collect();
    /// assert_eq!(secs, vec![1, 2, 4, 8]);
    /// ```
    pub fn schedule(&self) -> Vec<Duration> {
        let mut backoff = Backoff::new(self.clone());
        let mut delays = Vec::new();
        while let AttemptState::Backoff { delay, .. } = backoff.fail() {
            delays.push(delay);
            backoff.resume();
        }
        delays
    }

    /// Total time spent sleeping when every attempt fails
    pub fn worst_case_backoff(&self) -> Duration {
        self.schedule().into_iter().sum()
    }
}

impl Default for RetryPolicy {
    /// Five attempts, starting at one second and doubling
    fn default() -> Self {
        Self::new(5, Duration::from_millis(1000), 2)
    }
}

/// State of one fetch's retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// About to issue attempt `n` (1-based)
    Attempting(u32),

    /// Attempt `attempt` failed; wait `delay` before the next one
    Backoff {
        /// The attempt that just failed
        attempt: u32,
        /// How long to wait
        delay: Duration,
    },

    /// Attempt `n` produced a usable page
    Succeeded(u32),

    /// `n` attempts failed and the budget is spent
    Exhausted(u32),
}

/// Retry state machine for a single fetch
///
/// A fresh `Backoff` is created per fetch, so delays never carry over
/// between identifiers.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    state: AttemptState,
    next_delay: Duration,
}

impl Backoff {
    /// Start in `Attempting(1)`
    pub fn new(policy: RetryPolicy) -> Self {
        let next_delay = policy.initial_delay;
        Self {
            policy,
            state: AttemptState::Attempting(1),
            next_delay,
        }
    }

    /// Current state
    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Number of the current (or last) attempt
    pub fn attempt(&self) -> u32 {
        match self.state {
            AttemptState::Attempting(n)
            | AttemptState::Succeeded(n)
            | AttemptState::Exhausted(n)
            | AttemptState::Backoff { attempt: n, .. } => n,
        }
    }

    /// The current attempt succeeded
    pub fn succeed(&mut self) -> AttemptState {
        if let AttemptState::Attempting(n) = self.state {
            self.state = AttemptState::Succeeded(n);
        }
        self.state
    }

    /// The current attempt failed; move to `Backoff` or `Exhausted`
    pub fn fail(&mut self) -> AttemptState {
        if let AttemptState::Attempting(n) = self.state {
            self.state = if n >= self.policy.max_attempts {
                AttemptState::Exhausted(n)
            } else {
                let delay = self.next_delay;
                self.next_delay = self.next_delay.saturating_mul(self.policy.multiplier);
                AttemptState::Backoff { attempt: n, delay }
            };
        }
        self.state
    }

    /// The backoff delay has elapsed; move to the next attempt
    pub fn resume(&mut self) -> AttemptState {
        if let AttemptState::Backoff { attempt, .. } = self.state {
            self.state = AttemptState::Attempting(attempt + 1);
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
        assert_eq!(policy.multiplier, 2);
    }

    #[test]
    fn test_default_schedule_doubles() {
        let schedule = RetryPolicy::default().schedule();
        assert_eq!(
            schedule,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
            ]
        );
        assert_eq!(RetryPolicy::default().worst_case_backoff(), Duration::from_secs(15));
    }

    #[test]
    fn test_full_transition_sequence() {
        let mut backoff = Backoff::new(RetryPolicy::new(3, Duration::from_millis(100), 2));
        assert_eq!(backoff.state(), AttemptState::Attempting(1));

        assert_eq!(
            backoff.fail(),
            AttemptState::Backoff { attempt: 1, delay: Duration::from_millis(100) }
        );
        assert_eq!(backoff.resume(), AttemptState::Attempting(2));
        assert_eq!(
            backoff.fail(),
            AttemptState::Backoff { attempt: 2, delay: Duration::from_millis(200) }
        );
        assert_eq!(backoff.resume(), AttemptState::Attempting(3));
        assert_eq!(backoff.fail(), AttemptState::Exhausted(3));
        assert_eq!(backoff.attempt(), 3);
    }

    #[test]
    fn test_success_after_retry() {
        let mut backoff = Backoff::new(RetryPolicy::default());
        backoff.fail();
        backoff.resume();
        assert_eq!(backoff.succeed(), AttemptState::Succeeded(2));
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut backoff = Backoff::new(RetryPolicy::default());
        // resume without a pending backoff does nothing
        assert_eq!(backoff.resume(), AttemptState::Attempting(1));

        backoff.fail();
        // failing while backing off does not consume another attempt
        let state = backoff.fail();
        assert_eq!(state, AttemptState::Backoff { attempt: 1, delay: Duration::from_secs(1) });

        backoff.resume();
        backoff.succeed();
        assert_eq!(backoff.fail(), AttemptState::Succeeded(2));
    }

    #[test]
    fn test_single_attempt_policy() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1), 2);
        assert_eq!(policy.max_attempts, 1);
        assert!(policy.schedule().is_empty());

        let mut backoff = Backoff::new(policy);
        assert_eq!(backoff.fail(), AttemptState::Exhausted(1));
    }
}
