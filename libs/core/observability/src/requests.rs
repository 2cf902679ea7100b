//! Process-wide tallies of product reads and writes.
//!
//! GET counts list and single-product reads; POST counts create attempts,
//! including ones rejected by validation. Both only grow and reset on restart.

use metrics::counter;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub get: u64,
    pub post: u64,
}

/// Shared GET/POST request counters.
///
/// Clones share the same underlying counts, so one instance can be handed
/// to every service that needs it.
#[derive(Clone, Debug, Default)]
pub struct RequestCounters {
    get: Arc<AtomicU64>,
    post: Arc<AtomicU64>,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a read and return the counts including it.
    pub fn record_get(&self) -> RequestCounts {
        self.get.fetch_add(1, Ordering::Relaxed);
        counter!("products_requests_total", "method" => "GET").increment(1);
        self.snapshot()
    }

    /// Count a create attempt and return the counts including it.
    pub fn record_post(&self) -> RequestCounts {
        self.post.fetch_add(1, Ordering::Relaxed);
        counter!("products_requests_total", "method" => "POST").increment(1);
        self.snapshot()
    }

    pub fn snapshot(&self) -> RequestCounts {
        RequestCounts {
            get: self.get.load(Ordering::Relaxed),
            post: self.post.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        assert_eq!(RequestCounters::new().snapshot(), RequestCounts::default());
    }

    #[test]
    fn test_record_returns_updated_counts() {
        let counters = RequestCounters::new();

        assert_eq!(counters.record_get(), RequestCounts { get: 1, post: 0 });
        assert_eq!(counters.record_post(), RequestCounts { get: 1, post: 1 });
        assert_eq!(counters.record_get(), RequestCounts { get: 2, post: 1 });
    }

    #[test]
    fn test_clones_share_counts() {
        let counters = RequestCounters::new();
        let other = counters.clone();

        other.record_post();
        other.record_post();
        counters.record_get();

        assert_eq!(counters.snapshot(), RequestCounts { get: 1, post: 2 });
        assert_eq!(other.snapshot(), counters.snapshot());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let counters = RequestCounters::new();

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let counters = counters.clone();
                tokio::spawn(async move {
                    counters.record_get();
                    counters.record_post();
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(counters.snapshot(), RequestCounts { get: 50, post: 50 });
    }
}
