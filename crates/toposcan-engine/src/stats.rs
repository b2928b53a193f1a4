//! Run statistics collection and reporting.
//!
//! Workers record into a shared [`RunStatistics`] through atomic counters;
//! the pipeline reads a [`RunSnapshot`] for progress lines and the final
//! summary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use toposcan_core::Category;

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSnapshot {
    /// Time since the collector was created.
    pub elapsed: Duration,
    /// Records handed to the pool.
    pub inputs: u64,
    /// Records whose batch finished.
    pub processed: u64,
    /// Configurations derived by extension or decoration.
    pub derived: u64,
    /// Derived configurations dropped as already seen.
    pub duplicates: u64,
    /// Configurations rejected by the unimodality check.
    pub rejected: u64,
    /// Records or candidates whose graph could not be built.
    pub failures: u64,
    /// Classified as neither SCFT nor LST.
    pub unclassified: u64,
    pub saved_scft: u64,
    pub saved_lst: u64,
}

impl RunSnapshot {
    /// Total saved configurations.
    pub fn saved(&self) -> u64 {
        self.saved_scft + self.saved_lst
    }

    /// Processed records per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }
}

/// Thread-safe collector for run statistics.
#[derive(Debug)]
pub struct RunStatistics {
    start_time: Instant,
    inputs: AtomicU64,
    processed: AtomicU64,
    derived: AtomicU64,
    duplicates: AtomicU64,
    rejected: AtomicU64,
    failures: AtomicU64,
    unclassified: AtomicU64,
    saved_scft: AtomicU64,
    saved_lst: AtomicU64,
}

impl RunStatistics {
    /// Creates a collector; the start time is recorded now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            inputs: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            derived: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            unclassified: AtomicU64::new(0),
            saved_scft: AtomicU64::new(0),
            saved_lst: AtomicU64::new(0),
        }
    }

    pub fn record_inputs(&self, count: u64) {
        self.inputs.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a finished batch of `count` records.
    pub fn record_processed(&self, count: u64) {
        self.processed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_derived(&self) {
        self.derived.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a classification outcome; only SCFT and LST count as saved.
    pub fn record_category(&self, category: Category) {
        let counter = match category {
            Category::Scft => &self.saved_scft,
            Category::Lst => &self.saved_lst,
            Category::Unclassified => &self.unclassified,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current processed count.
    pub fn current_processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Returns the current input count.
    pub fn current_inputs(&self) -> u64 {
        self.inputs.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            elapsed: self.elapsed(),
            inputs: self.inputs.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
            derived: self.derived.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            unclassified: self.unclassified.load(Ordering::Relaxed),
            saved_scft: self.saved_scft.load(Ordering::Relaxed),
            saved_lst: self.saved_lst.load(Ordering::Relaxed),
        }
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collector_is_zero() {
        let stats = RunStatistics::new();
        let snap = stats.snapshot();
        assert_eq!(snap.processed, 0);
        assert_eq!(snap.saved(), 0);
        assert_eq!(snap.failures, 0);
    }

    #[test]
    fn test_record_categories() {
        let stats = RunStatistics::new();
        stats.record_category(Category::Scft);
        stats.record_category(Category::Scft);
        stats.record_category(Category::Lst);
        stats.record_category(Category::Unclassified);

        let snap = stats.snapshot();
        assert_eq!(snap.saved_scft, 2);
        assert_eq!(snap.saved_lst, 1);
        assert_eq!(snap.unclassified, 1);
        assert_eq!(snap.saved(), 3);
    }

    #[test]
    fn test_throughput_without_time() {
        let snap = RunSnapshot {
            processed: 10,
            ..RunSnapshot::default()
        };
        assert_eq!(snap.throughput(), 0.0);

        let snap = RunSnapshot {
            elapsed: Duration::from_secs(2),
            processed: 10,
            ..RunSnapshot::default()
        };
        assert!((snap.throughput() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_collector_thread_safety() {
        let stats = RunStatistics::new();

        rayon::scope(|s| {
            for _ in 0..4 {
                s.spawn(|_| {
                    for _ in 0..1000 {
                        stats.record_derived();
                        stats.record_duplicate();
                    }
                    stats.record_processed(1000);
                });
            }
        });

        let snap = stats.snapshot();
        assert_eq!(snap.derived, 4000);
        assert_eq!(snap.duplicates, 4000);
        assert_eq!(stats.current_processed(), 4000);
    }
}
