use std::time::Duration;

use futures::future::BoxFuture;
use tracing::warn;

use deskflow_core::config::RetryConfig;
use deskflow_core::error::{DeskflowError, Result};
use deskflow_core::traits::CompletionClient;

/// A completion client that retries transient failures with backoff.
pub struct RetryingClient {
    inner: Box<dyn CompletionClient>,
    retry_config: RetryConfig,
}

impl RetryingClient {
    pub fn new(inner: Box<dyn CompletionClient>, retry_config: RetryConfig) -> Self {
        Self {
            inner,
            retry_config,
        }
    }
}

fn is_retryable(e: &DeskflowError) -> bool {
    match e {
        DeskflowError::CompletionRequest(msg) => {
            msg.contains("429")
                || msg.contains("500")
                || msg.contains("502")
                || msg.contains("503")
                || msg.contains("timeout")
                || msg.contains("connection")
        }
        _ => false,
    }
}

fn calculate_backoff(attempt: u32, config: &RetryConfig) -> Duration {
    let ms = (config.initial_backoff_ms * 2u64.pow(attempt)).min(config.max_backoff_ms);
    // Add jitter: 0.8x to 1.2x
    let jitter = 0.8 + rand::random::<f64>() * 0.4;
    Duration::from_millis((ms as f64 * jitter) as u64)
}

impl CompletionClient for RetryingClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let max_retries = self.retry_config.max_retries;
            let mut last_err = None;

            for attempt in 0..=max_retries {
                match self.inner.complete(prompt).await {
                    Ok(text) => return Ok(text),
                    Err(e) => {
                        if is_retryable(&e) && attempt < max_retries {
                            let backoff = calculate_backoff(attempt, &self.retry_config);
                            warn!(
                                attempt = attempt + 1,
                                max_retries,
                                backoff_ms = backoff.as_millis() as u64,
                                error = %e,
                                "Retrying completion request"
                            );
                            tokio::time::sleep(backoff).await;
                            last_err = Some(e);
                            continue;
                        }
                        last_err = Some(e);
                        break;
                    }
                }
            }

            Err(last_err
                .unwrap_or_else(|| DeskflowError::CompletionRequest("All attempts failed".into())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyClient {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl CompletionClient for FlakyClient {
        fn complete<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String>> {
            Box::pin(async move {
                let n = self.calls.fetch_add(1, Ordering::SeqCst);
                if n < self.fail_first {
                    Err(DeskflowError::CompletionRequest("HTTP 503: upstream".into()))
                } else {
                    Ok("ok".to_string())
                }
            })
        }
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(&DeskflowError::CompletionRequest(
            "HTTP 429: rate limited".into()
        )));
        assert!(is_retryable(&DeskflowError::CompletionRequest(
            "connection refused".into()
        )));
        assert!(!is_retryable(&DeskflowError::CompletionRequest(
            "HTTP 401: bad key".into()
        )));
        assert!(!is_retryable(&DeskflowError::CompletionParse(
            "no text".into()
        )));
    }

    #[test]
    fn test_backoff_is_bounded() {
        let config = RetryConfig {
            max_retries: 5,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        };
        for attempt in 0..10 {
            let backoff = calculate_backoff(attempt, &config);
            // 1.2x jitter on the 8s cap
            assert!(backoff <= Duration::from_millis(9_600));
        }
    }

    #[tokio::test]
    async fn test_retries_transient_failure() {
        let client = RetryingClient::new(
            Box::new(FlakyClient {
                calls: AtomicUsize::new(0),
                fail_first: 1,
            }),
            RetryConfig {
                max_retries: 2,
                initial_backoff_ms: 1,
                max_backoff_ms: 2,
            },
        );
        let out = client.complete("hi").await.unwrap();
        assert_eq!(out, "ok");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let client = RetryingClient::new(
            Box::new(FlakyClient {
                calls: AtomicUsize::new(0),
                fail_first: 10,
            }),
            RetryConfig {
                max_retries: 1,
                initial_backoff_ms: 1,
                max_backoff_ms: 2,
            },
        );
        assert!(client.complete("hi").await.is_err());
    }
}
