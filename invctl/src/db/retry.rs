//! Bounded retry for transient database failures.
//!
//! Every query in this service is either read-only or an idempotent
//! single-row write keyed by primary id, so re-running an operation after
//! a connection-level failure is safe. Logical failures (constraint
//! violations, missing rows) are never retried.

use std::future::Future;

use tracing::warn;

use crate::config::RetrySettings;
use crate::db::errors::{DbError, Result};

/// Run `op`, re-attempting it up to `settings.max_attempts` times with a
/// fixed `settings.backoff` delay between attempts, as long as the failure
/// is transient ([`DbError::is_transient`]).
pub async fn retry_transient<T, F, Fut>(settings: &RetrySettings, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_transient() && attempt < settings.max_attempts => {
                warn!(
                    "Database operation failed (attempt {attempt}/{}): {err}, retrying",
                    settings.max_attempts
                );
                tokio::time::sleep(settings.backoff).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_retry() -> RetrySettings {
        RetrySettings {
            max_attempts: 3,
            backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_transient(&fast_retry(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(DbError::Connection {
                        message: "connection refused".to_string(),
                    })
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_transient(&fast_retry(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(DbError::Connection {
                    message: "still down".to_string(),
                })
            }
        })
        .await;

        assert!(matches!(result.unwrap_err(), DbError::Connection { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_logical_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_transient(&fast_retry(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DbError::NotFound) }
        })
        .await;

        assert!(matches!(result.unwrap_err(), DbError::NotFound));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_short_circuits() {
        let calls = AtomicU32::new(0);
        let result = retry_transient(&fast_retry(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok("ok") }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
