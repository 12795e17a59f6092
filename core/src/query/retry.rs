//! Retry policy for query fetches
//!
//! The runner does not own a timer: callers pass a sleep function, so the same
//! loop runs under tokio (CLI) and in the browser (gloo timers).

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Policy for mutations: one attempt only
    pub fn never() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Backoff before retry number `attempt` (0-based): `base * 2^attempt`, capped
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let millis = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(millis)
    }

    /// Whether a request that has already been retried `attempt` times
    /// should be tried again after failing with `err`
    pub fn should_retry(&self, attempt: u32, err: &ApiError) -> bool {
        attempt < self.max_retries && err.is_retryable()
    }
}

/// Run `op` until it succeeds, fails with a final error, or retries run out.
pub async fn run_with_retry<T, Op, OpFut, Sleep, SleepFut>(
    policy: &RetryPolicy,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T, ApiError>
where
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, ApiError>>,
    Sleep: FnMut(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if policy.should_retry(attempt, &err) => {
                let delay = policy.delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Request failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            endpoint: "/adventures/1".to_string(),
            status: code,
            message: None,
        }
    }

    #[test]
    fn delay_doubles_until_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay(1), Duration::from_millis(2_000));
        assert_eq!(policy.delay(2), Duration::from_millis(4_000));
        assert_eq!(policy.delay(10), Duration::from_millis(30_000));
        assert_eq!(policy.delay(80), Duration::from_millis(30_000));
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = run_with_retry(
            &RetryPolicy::default(),
            || {
                calls.set(calls.get() + 1);
                async { Err(status(404)) }
            },
            |_| async {},
        )
        .await;
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn server_errors_retry_up_to_limit() {
        let calls = Cell::new(0);
        let sleeps = RefCell::new(Vec::new());
        let result: Result<(), ApiError> = run_with_retry(
            &RetryPolicy::default(),
            || {
                calls.set(calls.get() + 1);
                async { Err(status(503)) }
            },
            |delay| {
                sleeps.borrow_mut().push(delay);
                async {}
            },
        )
        .await;
        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(calls.get(), 4);
        assert_eq!(
            *sleeps.borrow(),
            vec![
                Duration::from_millis(1_000),
                Duration::from_millis(2_000),
                Duration::from_millis(4_000)
            ]
        );
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let calls = Cell::new(0);
        let result = run_with_retry(
            &RetryPolicy::default(),
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { if n < 3 { Err(status(502)) } else { Ok(n) } }
            },
            |_| async {},
        )
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn never_policy_makes_single_attempt() {
        let calls = Cell::new(0);
        let _: Result<(), ApiError> = run_with_retry(
            &RetryPolicy::never(),
            || {
                calls.set(calls.get() + 1);
                async { Err(status(500)) }
            },
            |_| async {},
        )
        .await;
        assert_eq!(calls.get(), 1);
    }
}
