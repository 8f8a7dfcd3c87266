//! Sliding window rate limiting algorithm
//!
//! Keeps the instants of accepted requests per address and rejects once the
//! count inside the trailing window reaches the limit.

use super::RateLimitAlgorithm;
use crate::error::{QuoteError, QuoteResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct SlidingWindow {
    max_requests: u32,
    window: Duration,
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindow {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: Mutex::new(HashMap::new()),
        }
    }

    pub fn try_acquire_at(&self, key: &str, now: Instant) -> QuoteResult<bool> {
        let mut requests = self.lock()?;
        let timestamps = requests.entry(key.to_string()).or_default();

        prune(timestamps, now, self.window);

        if timestamps.len() >= self.max_requests as usize {
            return Ok(false);
        }

        timestamps.push_back(now);
        Ok(true)
    }

    pub fn sweep_at(&self, now: Instant) -> QuoteResult<usize> {
        let mut requests = self.lock()?;
        let before = requests.len();

        requests.retain(|_, timestamps| {
            prune(timestamps, now, self.window);
            !timestamps.is_empty()
        });

        Ok(before - requests.len())
    }

    fn lock(&self) -> QuoteResult<std::sync::MutexGuard<'_, HashMap<String, VecDeque<Instant>>>> {
        self.requests
            .lock()
            .map_err(|_| QuoteError::Internal("Failed to acquire lock on request windows".to_string()))
    }
}

fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

impl RateLimitAlgorithm for SlidingWindow {
    fn try_acquire(&self, key: &str) -> QuoteResult<bool> {
        self.try_acquire_at(key, Instant::now())
    }

    fn sweep(&self) -> QuoteResult<usize> {
        self.sweep_at(Instant::now())
    }

    fn tracked_keys(&self) -> QuoteResult<usize> {
        Ok(self.lock()?.len())
    }
}
