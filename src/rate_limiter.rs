use crate::algorithms::{FixedAllotment, RateLimitAlgorithm, RateLimitPolicy, SlidingWindow};
use crate::error::{QuoteError, QuoteResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Options accepted by [`RateLimiter::create`].
#[derive(Debug, Clone)]
pub struct RateLimitOptions {
    pub interval: Duration,
    pub unique_token_per_interval: u32,
    pub policy: RateLimitPolicy,
}

impl Default for RateLimitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            unique_token_per_interval: 500,
            policy: RateLimitPolicy::FixedAllotment,
        }
    }
}

/// Per-endpoint gate keyed by client address. Cheap to clone.
#[derive(Clone)]
pub struct RateLimiter {
    name: &'static str,
    algorithm: Arc<dyn RateLimitAlgorithm>,
}

impl RateLimiter {
    pub fn create(name: &'static str, options: RateLimitOptions) -> Self {
        let algorithm: Arc<dyn RateLimitAlgorithm> = match options.policy {
            RateLimitPolicy::FixedAllotment => {
                Arc::new(FixedAllotment::new(options.unique_token_per_interval))
            }
            RateLimitPolicy::SlidingWindow => Arc::new(SlidingWindow::new(
                options.unique_token_per_interval,
                options.interval,
            )),
        };

        Self { name, algorithm }
    }

    /// Check one request. Requests without a client address are never throttled.
    pub fn check(&self, client_address: Option<&str>) -> QuoteResult<()> {
        let Some(address) = client_address else {
            tracing::debug!(limiter = self.name, "No client address, skipping rate limit");
            return Ok(());
        };

        if self.algorithm.try_acquire(address)? {
            Ok(())
        } else {
            tracing::warn!(limiter = self.name, client = %address, "Rate limit exceeded");
            Err(QuoteError::RateLimitExceeded)
        }
    }

    pub fn sweep(&self) -> QuoteResult<usize> {
        self.algorithm.sweep()
    }

    pub fn tracked_addresses(&self) -> QuoteResult<usize> {
        self.algorithm.tracked_keys()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Background task pruning stale limiter state on a fixed period.
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn spawn(limiters: Vec<RateLimiter>, period: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        for limiter in &limiters {
                            match limiter.sweep() {
                                Ok(0) => {}
                                Ok(removed) => tracing::debug!(
                                    limiter = limiter.name(),
                                    removed,
                                    "Swept idle rate limit entries"
                                ),
                                Err(e) => tracing::error!(
                                    limiter = limiter.name(),
                                    error = %e,
                                    "Rate limit sweep failed"
                                ),
                            }
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }

            tracing::info!("Rate limit sweeper stopped");
        });

        Self { shutdown, handle }
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Rate limit sweeper task failed");
        }
    }
}
