//! Run-scoped set of canonical lines already emitted.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// First-seen-wins guard over canonical configuration lines.
///
/// One set lives for one run and is shared by every worker of that run.
/// Independent runs own independent sets.
#[derive(Debug, Default)]
pub struct SeenSet {
    lines: Mutex<HashSet<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lines(&self) -> MutexGuard<'_, HashSet<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `line`; returns false when it was already present.
    pub fn insert(&self, line: &str) -> bool {
        let mut lines = self.lines();
        if lines.contains(line) {
            return false;
        }
        lines.insert(line.to_owned())
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines().contains(line)
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_first_seen_wins() {
        let seen = SeenSet::new();
        assert!(seen.insert("g4 L22 g6"));
        assert!(!seen.insert("g4 L22 g6"));
        assert!(seen.insert("g4 L22 g7"));
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("g4 L22 g6"));
    }

    #[test]
    fn test_sets_are_independent() {
        let a = SeenSet::new();
        let b = SeenSet::new();
        assert!(a.insert("g4"));
        assert!(b.insert("g4"));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_admit_one_winner() {
        let seen = SeenSet::new();
        let winners = AtomicU64::new(0);

        rayon::scope(|s| {
            for _ in 0..8 {
                s.spawn(|_| {
                    for i in 0..200 {
                        if seen.insert(&format!("g{}", i)) {
                            winners.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::Relaxed), 200);
        assert_eq!(seen.len(), 200);
    }

    #[test]
    fn test_poisoned_lock_keeps_seen_lines() {
        let seen = SeenSet::new();
        assert!(seen.insert("g4"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = seen.lines.lock().unwrap();
            panic!("worker died");
        }));
        assert!(result.is_err());

        assert!(!seen.insert("g4"));
        assert!(seen.insert("g6"));
        assert_eq!(seen.len(), 2);
    }
}
