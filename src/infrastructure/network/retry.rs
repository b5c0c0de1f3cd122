//! Bounded linear-backoff retry around a fetch operation.
//!
//! The retry logic is a small state machine with a pure transition function
//! so the sequencing is testable without timers; `fetch_with_retry` is the
//! async driver that adds the sleeps.

use std::future::Future;
use std::time::Duration;

use crate::domain::error::DirectoryError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Backoff before attempt N+1 is `base_delay * N`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn backoff_after(&self, failed_attempt: u32) -> Duration {
        self.base_delay * failed_attempt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching { attempt: u32 },
    RetryScheduled { attempt: u32 },
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchEvent {
    Start,
    Success,
    /// Transport or HTTP-status failure.
    Retryable,
    /// Shape/validation failure; retrying cannot fix it.
    Terminal,
}

/// Pure transition function. Events that make no sense in the current state
/// leave it unchanged.
pub fn transition(state: FetchState, event: FetchEvent, policy: &RetryPolicy) -> FetchState {
    match (state, event) {
        (FetchState::Idle, FetchEvent::Start) => FetchState::Fetching { attempt: 1 },
        (FetchState::RetryScheduled { attempt }, FetchEvent::Start) => {
            FetchState::Fetching { attempt }
        }
        (FetchState::Fetching { .. }, FetchEvent::Success) => FetchState::Succeeded,
        (FetchState::Fetching { attempt }, FetchEvent::Retryable) => {
            if attempt < policy.max_attempts {
                FetchState::RetryScheduled {
                    attempt: attempt + 1,
                }
            } else {
                FetchState::Failed
            }
        }
        (FetchState::Fetching { .. }, FetchEvent::Terminal) => FetchState::Failed,
        (state, _) => state,
    }
}

/// Drive `op` through the state machine: retryable failures back off and
/// re-attempt up to the policy bound, terminal failures and success return
/// immediately. Each call starts from a fresh attempt counter; the caller's
/// manual retry is simply calling this again.
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, DirectoryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DirectoryError>>,
{
    let mut state = transition(FetchState::Idle, FetchEvent::Start, policy);
    loop {
        let FetchState::Fetching { attempt } = state else {
            unreachable!("retry driver only awaits in the Fetching state");
        };
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let event = if err.is_retryable() {
                    FetchEvent::Retryable
                } else {
                    FetchEvent::Terminal
                };
                state = transition(state, event, policy);
                match state {
                    FetchState::RetryScheduled { .. } => {
                        let delay = policy.backoff_after(attempt);
                        tracing::warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "fetch failed, retrying after backoff"
                        );
                        tokio::time::sleep(delay).await;
                        state = transition(state, FetchEvent::Start, policy);
                    }
                    _ => return Err(err),
                }
            }
        }
    }
}
