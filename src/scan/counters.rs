//! Shared scan counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// `processed` and `found` totals shared by the workers and the reporter.
///
/// Both only ever go up. `found <= processed` holds for every snapshot:
/// writers bump `processed` before `found`, readers load `found` first.
#[derive(Debug, Default)]
pub struct ScanCounters {
    processed: AtomicU64,
    found: AtomicU64,
}

/// Point-in-time read of [`ScanCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    pub processed: u64,
    pub found: u64,
}

impl ScanCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished candidate.
    pub fn record(&self, resolved: bool) {
        self.processed.fetch_add(1, Ordering::SeqCst);
        if resolved {
            self.found.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        let found = self.found.load(Ordering::SeqCst);
        let processed = self.processed.load(Ordering::SeqCst);
        CounterSnapshot { processed, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record() {
        let counters = ScanCounters::new();
        counters.record(true);
        counters.record(false);
        counters.record(false);

        assert_eq!(
            counters.snapshot(),
            CounterSnapshot {
                processed: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_concurrent_record_never_loses_updates() {
        let counters = Arc::new(ScanCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let counters = Arc::clone(&counters);
                std::thread::spawn(move || {
                    for i in 0..1000 {
                        counters.record((i + t) % 4 == 0);
                        let snap = counters.snapshot();
                        assert!(snap.found <= snap.processed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counters.processed(), 8000);
        assert_eq!(counters.found(), 2000);
    }
}
