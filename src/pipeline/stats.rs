//! Per-run counters
//!
//! One `RunStats` lives for the duration of a crawl run and is shared
//! between the pipeline and the coordinator. Counters are atomic so
//! concurrent completions can never corrupt them, whatever the threading
//! model of the caller.

use std::sync::atomic::{AtomicU64, Ordering};

/// Mutable counters for one crawl run
#[derive(Debug, Default)]
pub struct RunStats {
    records_processed: AtomicU64,
    validation_warnings: AtomicU64,
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    blocked_responses: AtomicU64,
}

/// Point-in-time copy of the run counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub records_processed: u64,
    pub validation_warnings: u64,
    pub pages_fetched: u64,
    pub fetch_failures: u64,
    pub blocked_responses: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incremented once per record, by the pipeline
    pub fn record_processed(&self) {
        self.records_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn validation_warning(&self) {
        self.validation_warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// 403/429 responses, tracked for operator visibility only
    pub fn blocked_response(&self) {
        self.blocked_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            records_processed: self.records_processed.load(Ordering::Relaxed),
            validation_warnings: self.validation_warnings.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            blocked_responses: self.blocked_responses.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Logs the end-of-run report
    ///
    /// A run that fetched pages but processed zero records is the signature
    /// of site markup changing under the selectors, so that case is warned
    /// rather than merely reported.
    pub fn log_report(&self) {
        tracing::info!(
            "Run summary: {} records processed, {} pages fetched, {} fetch failures, {} validation warnings",
            self.records_processed,
            self.pages_fetched,
            self.fetch_failures,
            self.validation_warnings
        );

        if self.blocked_responses > 0 {
            tracing::warn!(
                "{} responses looked blocked or rate limited (HTTP 403/429)",
                self.blocked_responses
            );
        }

        if self.records_processed == 0 && self.pages_fetched > 0 {
            tracing::warn!(
                "No records extracted from {} fetched pages; the site markup may have changed",
                self.pages_fetched
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = RunStats::new();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.records_processed, 0);
        assert_eq!(snapshot.validation_warnings, 0);
        assert_eq!(snapshot.pages_fetched, 0);
        assert_eq!(snapshot.fetch_failures, 0);
        assert_eq!(snapshot.blocked_responses, 0);
    }

    #[test]
    fn test_increments() {
        let stats = RunStats::new();
        stats.record_processed();
        stats.record_processed();
        stats.validation_warning();
        stats.page_fetched();
        stats.fetch_failure();
        stats.blocked_response();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.records_processed, 2);
        assert_eq!(snapshot.validation_warnings, 1);
        assert_eq!(snapshot.pages_fetched, 1);
        assert_eq!(snapshot.fetch_failures, 1);
        assert_eq!(snapshot.blocked_responses, 1);
    }

    #[test]
    fn test_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(RunStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record_processed();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.snapshot().records_processed, 8000);
    }
}
