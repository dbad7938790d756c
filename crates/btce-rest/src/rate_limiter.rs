//! Shared request pacer
//!
//! Wraps one [`IntervalGate`] per category behind a mutex so it can be
//! shared across tasks and across clients.

use std::time::Duration;

use btce_types::{IntervalGate, RateLimitCategory, RateLimitConfig, RateLimitResult};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Thread-safe pacer for outbound requests
///
/// A slot is reserved under the category's lock and the wait happens
/// outside of it, so the lock is never held across an await point.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    public: Mutex<IntervalGate>,
    private: Mutex<IntervalGate>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::btce_defaults())
    }
}

impl RateLimiter {
    /// Create a limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            public: Mutex::new(IntervalGate::new(config.public_interval)),
            private: Mutex::new(IntervalGate::new(config.private_interval)),
            config,
        }
    }

    /// Create a limiter that never waits (for testing)
    pub fn permissive() -> Self {
        Self::new(RateLimitConfig::permissive())
    }

    /// Configuration in use
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn gate(&self, category: RateLimitCategory) -> &Mutex<IntervalGate> {
        match category {
            RateLimitCategory::Public => &self.public,
            RateLimitCategory::Private => &self.private,
        }
    }

    /// Wait for the next slot of `category`
    ///
    /// Returns how long the caller waited.
    #[instrument(skip(self))]
    pub async fn acquire(&self, category: RateLimitCategory) -> Duration {
        let now = Instant::now();
        let slot = {
            let mut gate = self.gate(category).lock();
            Instant::from_std(gate.reserve(now.into_std()))
        };

        let wait = slot.saturating_duration_since(now);
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "Pacing request");
            tokio::time::sleep_until(slot).await;
        }
        wait
    }

    /// Take a slot only if one is free right now
    pub fn try_acquire(&self, category: RateLimitCategory) -> RateLimitResult {
        let now = Instant::now().into_std();
        match self.gate(category).lock().try_reserve(now) {
            Ok(()) => RateLimitResult::Allowed,
            Err(wait) => RateLimitResult::Limited { wait, category },
        }
    }

    /// Time until the next slot of `category` is free
    pub fn wait_time(&self, category: RateLimitCategory) -> Duration {
        self.gate(category).lock().wait_time(Instant::now().into_std())
    }

    /// Forget all previous requests
    pub fn reset(&self) {
        self.public.lock().reset();
        self.private.lock().reset();
    }
}
