// Typed sequential steps with a per-step timeout and bounded retry.
//
// Each step consumes the previous step's output, so a failure anywhere
// short-circuits the rest of the chain.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::client::ClientError;
use crate::config::DashboardConfig;

/// One stage of a linear pipeline
#[async_trait]
pub trait Step: Send + Sync {
    type Input: Clone + Send + Sync;
    type Output: Send;

    /// Step name for logging and failure reports
    fn name(&self) -> &'static str;

    async fn execute(&self, input: Self::Input) -> Result<Self::Output, ClientError>;
}

/// Failure of a named step
#[derive(Debug, Clone)]
pub struct StepFailure {
    pub step: &'static str,
    pub attempts: u32,
    pub error: ClientError,
}

#[derive(Debug, Clone)]
pub struct StepPolicy {
    /// Upper bound for a single attempt
    pub timeout: Duration,
    /// Extra attempts after the first, only for retryable errors
    pub retries: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl StepPolicy {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            timeout: config.timeout(),
            retries: config.retry_attempts,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    pub fn no_retry(timeout: Duration) -> Self {
        Self {
            timeout,
            retries: 0,
            backoff: Duration::ZERO,
        }
    }
}

/// Run `step` under `policy`. Authentication and client errors are never retried.
pub async fn run_step<S: Step>(
    step: &S,
    input: S::Input,
    policy: &StepPolicy,
) -> Result<S::Output, StepFailure> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        tracing::debug!(step = step.name(), attempt, "running step");

        let result = match timeout(policy.timeout, step.execute(input.clone())).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout),
        };

        match result {
            Ok(output) => return Ok(output),
            Err(error) if error.is_retryable() && attempt <= policy.retries => {
                let delay = policy.backoff * attempt;
                tracing::warn!(
                    step = step.name(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "step failed, retrying: {}",
                    error
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                return Err(StepFailure {
                    step: step.name(),
                    attempts: attempt,
                    error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with `error` for the first `failures` calls, then doubles its input
    struct Flaky {
        failures: u32,
        error: ClientError,
        calls: AtomicU32,
    }

    #[async_trait]
    impl Step for Flaky {
        type Input = u32;
        type Output = u32;

        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn execute(&self, input: u32) -> Result<u32, ClientError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(self.error.clone())
            } else {
                Ok(input * 2)
            }
        }
    }

    struct Stalls;

    #[async_trait]
    impl Step for Stalls {
        type Input = ();
        type Output = ();

        fn name(&self) -> &'static str {
            "stalls"
        }

        async fn execute(&self, _: ()) -> Result<(), ClientError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    fn fast_policy(retries: u32) -> StepPolicy {
        StepPolicy {
            timeout: Duration::from_secs(1),
            retries,
            backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn retries_network_errors_once() {
        let step = Flaky {
            failures: 1,
            error: ClientError::Network("reset".into()),
            calls: AtomicU32::new(0),
        };
        let output = run_step(&step, 21, &fast_policy(1)).await.unwrap();
        assert_eq!(output, 42);
        assert_eq!(step.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_unauthorized() {
        let step = Flaky {
            failures: 5,
            error: ClientError::Status { status: 401, message: "expired".into() },
            calls: AtomicU32::new(0),
        };
        let failure = run_step(&step, 1, &fast_policy(3)).await.unwrap_err();
        assert_eq!(failure.step, "flaky");
        assert_eq!(failure.attempts, 1);
        assert!(failure.error.is_unauthorized());
        assert_eq!(step.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_retry_budget() {
        let step = Flaky {
            failures: 10,
            error: ClientError::Status { status: 503, message: "down".into() },
            calls: AtomicU32::new(0),
        };
        let failure = run_step(&step, 1, &fast_policy(1)).await.unwrap_err();
        assert_eq!(failure.attempts, 2);
        assert_eq!(failure.error.status(), Some(503));
    }

    #[tokio::test]
    async fn attempt_timeout_becomes_timeout_error() {
        let policy = StepPolicy::no_retry(Duration::from_millis(20));
        let failure = run_step(&Stalls, (), &policy).await.unwrap_err();
        assert!(matches!(failure.error, ClientError::Timeout));
    }
}
