use super::RateLimitAlgorithm;
use crate::error::{QuoteError, QuoteResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Each address gets `capacity` requests for the lifetime of the process.
pub struct FixedAllotment {
    capacity: u32,
    remaining: RwLock<HashMap<String, u32>>,
}

impl FixedAllotment {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            remaining: RwLock::new(HashMap::new()),
        }
    }

    /// Tokens left for `key`; unknown keys have the full allotment.
    pub fn remaining(&self, key: &str) -> QuoteResult<u32> {
        let remaining = self
            .remaining
            .read()
            .map_err(|_| QuoteError::Internal("Failed to acquire read lock on allotments".to_string()))?;

        Ok(remaining.get(key).copied().unwrap_or(self.capacity))
    }
}

impl RateLimitAlgorithm for FixedAllotment {
    fn try_acquire(&self, key: &str) -> QuoteResult<bool> {
        let mut remaining = self
            .remaining
            .write()
            .map_err(|_| QuoteError::Internal("Failed to acquire write lock on allotments".to_string()))?;

        match remaining.get_mut(key) {
            Some(0) => Ok(false),
            Some(tokens) => {
                *tokens -= 1;
                Ok(true)
            }
            None => {
                // The first request always passes, even with a zero allotment.
                remaining.insert(key.to_string(), self.capacity.saturating_sub(1));
                Ok(true)
            }
        }
    }

    fn sweep(&self) -> QuoteResult<usize> {
        Ok(0)
    }

    fn tracked_keys(&self) -> QuoteResult<usize> {
        let remaining = self
            .remaining
            .read()
            .map_err(|_| QuoteError::Internal("Failed to acquire read lock on allotments".to_string()))?;
        Ok(remaining.len())
    }
}
