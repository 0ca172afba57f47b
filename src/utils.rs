use sha2::{Digest, Sha256};
use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use crate::types::EventHash;

/// Number of hex characters shown when an event hash is rendered in logs.
pub const SHORT_HASH_LEN: usize = 6;

static CLOCK_ANCHOR: OnceLock<(Instant, u64)> = OnceLock::new();
static LAST_TIMESTAMP: AtomicU64 = AtomicU64::new(0);

/// Nanoseconds since the Unix epoch, strictly increasing across calls within the process.
///
/// The wall clock is read once and then advanced with a monotonic [`Instant`], so the
/// value never goes backwards and two calls never return the same timestamp.
pub fn current_timestamp() -> u64 {
    let (anchor, epoch_nanos) = CLOCK_ANCHOR.get_or_init(|| {
        let epoch_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX / 2))
            .unwrap_or(0);
        (Instant::now(), epoch_nanos)
    });
    let elapsed = u64::try_from(anchor.elapsed().as_nanos()).unwrap_or(u64::MAX / 2);
    let now = epoch_nanos.saturating_add(elapsed).max(1);

    let previous = LAST_TIMESTAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or(0);
    now.max(previous.saturating_add(1))
}

/// Content hash over the creation fields of an event, in a fixed field order.
pub fn compute_event_hash(
    sender: &str,
    receiver: &str,
    amount: u64,
    timestamp: u64,
    parents: &[EventHash],
) -> EventHash {
    let mut hasher = Sha256::new();
    hasher.update(sender.as_bytes());
    hasher.update(receiver.as_bytes());
    hasher.update(amount.to_string().as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    for parent in parents {
        hasher.update(parent.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Minimum number of distinct true votes for an event to become valid: floor(2n/3) + 1.
///
/// Returns `None` for an empty network, which callers treat as "nothing to do".
pub fn calculate_threshold(total_participants: usize) -> Option<usize> {
    if total_participants == 0 {
        return None;
    }
    Some((2 * total_participants) / 3 + 1)
}

pub fn has_quorum(true_votes: usize, total_participants: usize) -> bool {
    calculate_threshold(total_participants).is_some_and(|threshold| true_votes >= threshold)
}

/// Median of the given timestamps. For an even count the lower of the two central
/// values is taken, never their average.
pub fn select_median(mut timestamps: Vec<u64>) -> Option<u64> {
    if timestamps.is_empty() {
        return None;
    }
    timestamps.sort_unstable();
    let len = timestamps.len();
    let index = if len % 2 == 1 { len / 2 } else { len / 2 - 1 };
    Some(timestamps[index])
}

pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_strictly_increase() {
        let mut last = current_timestamp();
        for _ in 0..1000 {
            let next = current_timestamp();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn hash_depends_on_every_field() {
        let base = compute_event_hash("Alice", "Bob", 30, 7, &[]);
        assert_eq!(base.len(), 64);
        assert_eq!(base, compute_event_hash("Alice", "Bob", 30, 7, &[]));
        assert_ne!(base, compute_event_hash("Alice", "Bob", 31, 7, &[]));
        assert_ne!(base, compute_event_hash("Alice", "Bob", 30, 8, &[]));
        assert_ne!(base, compute_event_hash("Bob", "Alice", 30, 7, &[]));
        assert_ne!(
            base,
            compute_event_hash("Alice", "Bob", 30, 7, &["abc".to_string()])
        );
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(select_median(vec![]), None);
        assert_eq!(select_median(vec![42]), Some(42));
        assert_eq!(select_median(vec![9, 1, 5]), Some(5));
        assert_eq!(select_median(vec![5, 1, 9, 3]), Some(3));
    }

    #[test]
    fn short_hash_handles_short_input() {
        assert_eq!(short_hash("abcdef0123"), "abcdef");
        assert_eq!(short_hash("abc"), "abc");
    }
}
