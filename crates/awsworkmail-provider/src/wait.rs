//! Resource waiting with fixed or exponential backoff and cancellation support.
//!
//! Provides a generic abstraction for waiting on AWS resources (or any async condition)
//! to reach a state, with a bounded total wait and cancellation.

use crate::error::ProviderError;
use anyhow::Result;
use awsworkmail_common::defaults::{DEFAULT_CREATE_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS};
use backon::{BackoffBuilder, ConstantBuilder, ExponentialBuilder};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Delay schedule between checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollInterval {
    Fixed(Duration),
    Exponential { initial: Duration, max: Duration },
}

/// Configuration for resource waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    pub interval: PollInterval,
    /// Maximum total time to wait before timeout
    pub timeout: Duration,
    /// Add randomness to delays
    pub jitter: bool,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: PollInterval::Fixed(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
            timeout: Duration::from_secs(DEFAULT_CREATE_TIMEOUT_SECS),
            jitter: false,
        }
    }
}

impl WaitConfig {
    pub fn fixed(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval: PollInterval::Fixed(interval),
            timeout,
            jitter: false,
        }
    }

    fn delays(&self) -> Box<dyn Iterator<Item = Duration>> {
        match self.interval {
            PollInterval::Fixed(delay) => {
                let mut builder = ConstantBuilder::default()
                    .with_delay(delay)
                    .with_max_times(usize::MAX);
                if self.jitter {
                    builder = builder.with_jitter();
                }
                Box::new(builder.build())
            }
            PollInterval::Exponential { initial, max } => {
                let mut builder = ExponentialBuilder::default()
                    .with_min_delay(initial)
                    .with_max_delay(max)
                    .with_factor(2.0)
                    .with_max_times(usize::MAX);
                if self.jitter {
                    builder = builder.with_jitter();
                }
                Box::new(builder.build())
            }
        }
    }

    fn max_delay(&self) -> Duration {
        match self.interval {
            PollInterval::Fixed(delay) => delay,
            PollInterval::Exponential { max, .. } => max,
        }
    }
}

/// Wait for a resource to reach the desired state.
///
/// The check runs at least once. Sleeps never extend past the timeout, and a
/// cancelled token interrupts a sleep immediately.
///
/// # Arguments
/// * `config` - Wait configuration
/// * `cancel` - Optional cancellation token
/// * `check` - Async function that returns `Ok(true)` when ready, `Ok(false)` to retry
/// * `resource_name` - Name for logging
///
/// # Returns
/// * `Ok(())` - Resource is ready
/// * `Err` - [`ProviderError::Timeout`], [`ProviderError::Cancelled`], or the
///   check's own error unchanged
///
/// # Example
/// ```ignore
/// wait_for_resource(
///     &WaitConfig::default(),
///     Some(&cancel_token),
///     || async {
///         let org = workmail.describe_organization(id).await?;
///         Ok(org.is_active())
///     },
///     "WorkMail organization",
/// ).await?;
/// ```
pub async fn wait_for_resource<F, Fut>(
    config: &WaitConfig,
    cancel: Option<&CancellationToken>,
    check: F,
    resource_name: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();
    let mut attempts = 0u32;
    let mut delays = config.delays();

    let cancelled = || ProviderError::Cancelled {
        resource: resource_name.to_string(),
    };

    loop {
        attempts += 1;

        if cancel.is_some_and(|token| token.is_cancelled()) {
            return Err(cancelled().into());
        }

        match check().await {
            Ok(true) => {
                debug!(resource = %resource_name, attempts, "Resource ready");
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => {
                warn!(resource = %resource_name, error = ?e, "Resource check failed");
                return Err(e);
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return Err(ProviderError::Timeout {
                resource: resource_name.to_string(),
                timeout: config.timeout,
                attempts,
            }
            .into());
        }

        let delay = delays
            .next()
            .unwrap_or_else(|| config.max_delay())
            .min(config.timeout - elapsed);
        debug!(
            resource = %resource_name,
            attempt = attempts,
            delay_ms = delay.as_millis(),
            "Resource not ready, retrying"
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = async {
                if let Some(token) = cancel {
                    token.cancelled().await
                } else {
                    std::future::pending::<()>().await
                }
            } => {
                return Err(cancelled().into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> WaitConfig {
        WaitConfig::fixed(Duration::from_millis(1), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_ready_after_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        wait_for_resource(
            &fast(),
            None,
            || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) >= 2) },
            "test",
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out() {
        let config = WaitConfig::fixed(Duration::from_millis(5), Duration::from_millis(30));
        let err = wait_for_resource(&config, None, || async { Ok(false) }, "slow thing")
            .await
            .unwrap_err();

        match err.downcast_ref::<ProviderError>() {
            Some(ProviderError::Timeout {
                resource, attempts, ..
            }) => {
                assert_eq!(resource, "slow thing");
                assert!(*attempts > 1);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_timeout_still_checks_once() {
        let config = WaitConfig::fixed(Duration::from_millis(1), Duration::ZERO);
        let counter = AtomicU32::new(0);
        let calls = &counter;
        wait_for_resource(
            &config,
            None,
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            },
            "test",
        )
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_check() {
        let token = CancellationToken::new();
        token.cancel();

        let err = wait_for_resource(&fast(), Some(&token), || async { Ok(true) }, "test")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_mid_sleep() {
        let config = WaitConfig::fixed(Duration::from_secs(60), Duration::from_secs(600));
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let err = wait_for_resource(&config, Some(&token), || async { Ok(false) }, "test")
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(30));
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_check_error_returned_unchanged() {
        let calls = Arc::new(AtomicU32::new(0));
        let err = wait_for_resource(
            &fast(),
            None,
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<bool, _>(anyhow::anyhow!("describe failed"))
                }
            },
            "test",
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "describe failed");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exponential_schedule() {
        let config = WaitConfig {
            interval: PollInterval::Exponential {
                initial: Duration::from_millis(1),
                max: Duration::from_millis(4),
            },
            timeout: Duration::from_secs(5),
            jitter: true,
        };
        let counter = AtomicU32::new(0);
        let calls = &counter;
        wait_for_resource(
            &config,
            None,
            || async move { Ok(calls.fetch_add(1, Ordering::SeqCst) >= 4) },
            "test",
        )
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
