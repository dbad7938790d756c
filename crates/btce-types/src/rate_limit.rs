//! Client-side request pacing
//!
//! The exchange throttles clients that send requests too quickly. Pacing is
//! expressed as a minimum interval between two consecutive requests, with
//! separate intervals for public market data and authenticated calls.

use std::time::{Duration, Instant};

/// Default interval between two requests of the same category
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Minimum-interval gate
///
/// Hands out request slots spaced at least `min_interval` apart. A slot is
/// reserved at call time, so concurrent callers are queued in reservation
/// order and each one waits at most `min_interval` past its predecessor.
#[derive(Debug)]
pub struct IntervalGate {
    /// Minimum gap between two slots
    min_interval: Duration,
    /// Earliest instant the next slot may start
    next_free: Option<Instant>,
}

impl IntervalGate {
    /// Create a gate with no previous request recorded
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_free: None,
        }
    }

    /// Reserve the next slot
    ///
    /// Returns the instant at which the caller may send its request. The
    /// returned instant is never earlier than `now`.
    pub fn reserve(&mut self, now: Instant) -> Instant {
        let slot = match self.next_free {
            Some(next_free) if next_free > now => next_free,
            _ => now,
        };
        self.next_free = Some(slot + self.min_interval);
        slot
    }

    /// Reserve a slot only if one is free at `now`
    ///
    /// Returns `Err(wait)` with the remaining time otherwise; nothing is
    /// recorded in that case.
    pub fn try_reserve(&mut self, now: Instant) -> Result<(), Duration> {
        match self.next_free {
            Some(next_free) if next_free > now => Err(next_free - now),
            _ => {
                self.next_free = Some(now + self.min_interval);
                Ok(())
            }
        }
    }

    /// Time left before a slot is free, zero if one is free now
    pub fn wait_time(&self, now: Instant) -> Duration {
        self.next_free
            .map(|next_free| next_free.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Forget the last request
    pub fn reset(&mut self) {
        self.next_free = None;
    }
}

/// Request pacing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Public market data endpoints (ticker, trades)
    pub public_interval: Duration,
    /// Authenticated trade API calls
    pub private_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::btce_defaults()
    }
}

impl RateLimitConfig {
    /// One request per second for both categories
    pub const fn btce_defaults() -> Self {
        Self {
            public_interval: DEFAULT_REQUEST_INTERVAL,
            private_interval: DEFAULT_REQUEST_INTERVAL,
        }
    }

    /// No pacing at all (for testing)
    pub const fn permissive() -> Self {
        Self {
            public_interval: Duration::ZERO,
            private_interval: Duration::ZERO,
        }
    }

    /// Set the public interval
    pub fn with_public_interval(mut self, interval: Duration) -> Self {
        self.public_interval = interval;
        self
    }

    /// Set the authenticated interval
    pub fn with_private_interval(mut self, interval: Duration) -> Self {
        self.private_interval = interval;
        self
    }
}

/// Request category, each paced independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitCategory {
    /// Unauthenticated market data
    Public,
    /// Signed trade API calls
    Private,
}

impl RateLimitCategory {
    /// Interval configured for this category
    pub fn interval(self, config: &RateLimitConfig) -> Duration {
        match self {
            Self::Public => config.public_interval,
            Self::Private => config.private_interval,
        }
    }
}

/// Result of a non-waiting acquisition attempt
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request may proceed
    Allowed,
    /// Request must wait the specified duration
    Limited {
        wait: Duration,
        category: RateLimitCategory,
    },
}

impl RateLimitResult {
    /// Check if the request is allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Get the wait duration if limited
    pub fn wait_duration(&self) -> Option<Duration> {
        match self {
            Self::Allowed => None,
            Self::Limited { wait, .. } => Some(*wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reservation_is_immediate() {
        let mut gate = IntervalGate::new(Duration::from_secs(1));
        let now = Instant::now();
        assert_eq!(gate.reserve(now), now);
    }

    #[test]
    fn test_reservations_are_spaced() {
        let interval = Duration::from_millis(250);
        let mut gate = IntervalGate::new(interval);
        let now = Instant::now();

        let first = gate.reserve(now);
        let second = gate.reserve(now);
        let third = gate.reserve(now + Duration::from_millis(10));

        assert_eq!(second - first, interval);
        assert_eq!(third - second, interval);
    }

    #[test]
    fn test_idle_gate_does_not_delay() {
        let interval = Duration::from_millis(100);
        let mut gate = IntervalGate::new(interval);
        let now = Instant::now();

        gate.reserve(now);
        let later = now + Duration::from_secs(5);
        assert_eq!(gate.reserve(later), later);
    }

    #[test]
    fn test_try_reserve() {
        let interval = Duration::from_millis(500);
        let mut gate = IntervalGate::new(interval);
        let now = Instant::now();

        assert!(gate.try_reserve(now).is_ok());
        let wait = gate.try_reserve(now + Duration::from_millis(100)).unwrap_err();
        assert_eq!(wait, Duration::from_millis(400));

        // A refused attempt records nothing
        assert_eq!(gate.wait_time(now), interval);
        assert!(gate.try_reserve(now + interval).is_ok());
    }

    #[test]
    fn test_zero_interval_never_waits() {
        let mut gate = IntervalGate::new(Duration::ZERO);
        let now = Instant::now();
        for _ in 0..10 {
            assert_eq!(gate.reserve(now), now);
        }
    }

    #[test]
    fn test_reset() {
        let mut gate = IntervalGate::new(Duration::from_secs(10));
        let now = Instant::now();
        gate.reserve(now);
        assert!(gate.wait_time(now) > Duration::ZERO);

        gate.reset();
        assert_eq!(gate.wait_time(now), Duration::ZERO);
    }

    #[test]
    fn test_config_defaults() {
        let config = RateLimitConfig::btce_defaults();
        assert_eq!(config.public_interval, Duration::from_secs(1));
        assert_eq!(config.private_interval, Duration::from_secs(1));
        assert_eq!(RateLimitConfig::default(), config);
    }

    #[test]
    fn test_category_interval() {
        let config = RateLimitConfig::btce_defaults()
            .with_public_interval(Duration::from_millis(200))
            .with_private_interval(Duration::from_millis(2000));

        assert_eq!(
            RateLimitCategory::Public.interval(&config),
            Duration::from_millis(200)
        );
        assert_eq!(
            RateLimitCategory::Private.interval(&config),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn test_rate_limit_result() {
        let allowed = RateLimitResult::Allowed;
        assert!(allowed.is_allowed());
        assert!(allowed.wait_duration().is_none());

        let limited = RateLimitResult::Limited {
            wait: Duration::from_secs(1),
            category: RateLimitCategory::Private,
        };
        assert!(!limited.is_allowed());
        assert_eq!(limited.wait_duration(), Some(Duration::from_secs(1)));
    }
}
