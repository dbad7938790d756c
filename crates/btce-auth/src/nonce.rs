//! Monotonic nonce source
//!
//! The trade API rejects any request whose nonce is not strictly greater
//! than the last one it accepted for the key. Nonces are seeded from the
//! current Unix time in seconds and bumped by one whenever the clock has
//! not moved past the previously issued value.

use parking_lot::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Strictly increasing nonce generator
///
/// One sequencer per API key. Wrap it in an `Arc` and hand the same
/// instance to every client that signs with that key; separate instances
/// only coordinate through the clock.
#[derive(Debug, Default)]
pub struct NonceSequencer {
    /// Lowest value the first nonce may take
    floor: u64,
    /// Last issued nonce, `None` until first use
    last: Mutex<Option<u64>>,
}

impl NonceSequencer {
    /// Create a sequencer seeded from the clock on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequencer whose first nonce is at least `floor`
    ///
    /// Useful to resume above a nonce already accepted by the exchange,
    /// e.g. after the exchange reported an invalid nonce.
    pub fn starting_at(floor: u64) -> Self {
        Self {
            floor,
            last: Mutex::new(None),
        }
    }

    /// Issue the next nonce
    ///
    /// Returns `max(now, last + 1)`, where `now` is the Unix time in
    /// seconds. Concurrent callers are serialized, so no two calls ever
    /// observe the same value.
    pub fn next(&self) -> u64 {
        let now = unix_seconds();
        let mut last = self.last.lock();

        let nonce = match *last {
            Some(previous) => now.max(previous + 1),
            None => {
                let seed = now.max(self.floor);
                debug!(seed, "Seeding nonce sequence");
                seed
            }
        };

        *last = Some(nonce);
        nonce
    }

    /// Last issued nonce, if any
    pub fn last(&self) -> Option<u64> {
        *self.last.lock()
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_seeded_from_clock() {
        let nonces = NonceSequencer::new();
        assert_eq!(nonces.last(), None);

        let before = unix_seconds();
        let first = nonces.next();
        assert!(first >= before);
        assert_eq!(nonces.last(), Some(first));
    }

    #[test]
    fn test_strictly_increasing_within_one_second() {
        let nonces = NonceSequencer::new();
        let mut previous = nonces.next();
        for _ in 0..1000 {
            let nonce = nonces.next();
            assert!(nonce > previous);
            previous = nonce;
        }
    }

    #[test]
    fn test_starting_at_floor() {
        let floor = unix_seconds() + 1_000_000;
        let nonces = NonceSequencer::starting_at(floor);

        assert_eq!(nonces.next(), floor);
        assert_eq!(nonces.next(), floor + 1);
        assert_eq!(nonces.next(), floor + 2);
    }

    #[test]
    fn test_floor_in_the_past_uses_clock() {
        let nonces = NonceSequencer::starting_at(1);
        assert!(nonces.next() > 1);
    }

    #[test]
    fn test_concurrent_nonces_unique_and_ordered() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let nonces = Arc::new(NonceSequencer::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let nonces = Arc::clone(&nonces);
                thread::spawn(move || {
                    (0..PER_THREAD).map(|_| nonces.next()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let observed = handle.join().unwrap();
            assert!(observed.windows(2).all(|pair| pair[0] < pair[1]));
            for nonce in observed {
                assert!(seen.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(seen.len(), THREADS * PER_THREAD);
    }
}
