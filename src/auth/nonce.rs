//! Nonce generation for Kraken API authentication.
//!
//! Kraken requires an increasing nonce for each authenticated request
//! to prevent replay attacks. Nonces are nanoseconds since the UNIX epoch,
//! sent as a plain decimal integer.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Trait for providing nonces for authenticated requests.
///
/// The nonce should be greater than any previously returned value
/// for the same API key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    fn next_nonce(&self) -> u64;
}

/// Current wall-clock time in nanoseconds since the UNIX epoch.
///
/// Clocks set before the epoch read as zero.
pub(crate) fn current_time_nanos() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos).unwrap_or_default()
}

/// A nonce provider that reads the clock and nothing else.
///
/// Two calls closer together than the clock resolution may return the
/// same value. Kraken rejects the second request in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockNonce;

impl NonceProvider for ClockNonce {
    fn next_nonce(&self) -> u64 {
        current_time_nanos()
    }
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses nanoseconds since UNIX epoch, with an atomic counter to ensure
/// uniqueness even for requests made within the clock resolution.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = current_time_nanos();

        // Use the max of current time and last + 1.
        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last.saturating_add(1));

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
            // Another thread won the race, retry against its value.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(IncreasingNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                let mut nonces = Vec::new();
                for _ in 0..1000 {
                    nonces.push(p.next_nonce());
                }
                nonces
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            for nonce in nonces {
                assert!(
                    all_nonces.insert(nonce),
                    "Nonce must be unique across threads"
                );
            }
        }
    }

    #[test]
    fn test_nonce_saturates_at_max() {
        let provider = IncreasingNonce {
            last_nonce: AtomicU64::new(u64::MAX),
        };
        assert_eq!(provider.next_nonce(), u64::MAX);
    }

    #[test]
    fn test_clock_nonce_non_decreasing() {
        let first = ClockNonce.next_nonce();
        let second = ClockNonce.next_nonce();
        assert!(first > 0);
        assert!(second >= first);
    }

    #[test]
    fn test_nonce_is_nanosecond_scale() {
        // 2020-01-01T00:00:00Z in nanoseconds.
        let floor = 1_577_836_800_000_000_000u64;
        assert!(IncreasingNonce::new().next_nonce() > floor);
        assert!(ClockNonce.next_nonce() > floor);
    }
}
