use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use lazy_static::lazy_static;

#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Running summary of observed values. Values are recorded in the unit the
/// metric name implies (milliseconds for durations, bytes for sizes).
#[derive(Debug, Default)]
pub struct Histogram {
    count: AtomicU64,
    sum: AtomicU64,
    max: AtomicU64,
}

impl Histogram {
    pub fn observe(&self, value: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(value, Ordering::Relaxed);
        self.max.fetch_max(value, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn avg(&self) -> u64 {
        let count = self.count.load(Ordering::Relaxed);
        if count == 0 {
            return 0;
        }
        self.sum.load(Ordering::Relaxed) / count
    }

    pub fn max(&self) -> u64 {
        self.max.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
pub struct IndexerMetrics {
    pub total_errors: Counter,
    pub height_success: Counter,
    pub height_duration: Histogram,
    pub db_size_after_height: Histogram,
    pub use_case_duration: Histogram,
}

lazy_static! {
    pub static ref INDEXER_METRICS: IndexerMetrics = IndexerMetrics::default();
}

/// Observes elapsed milliseconds into a histogram when dropped.
pub struct Timer {
    started_at: Instant,
    histogram: &'static Histogram,
}

impl Timer {
    pub fn new(histogram: &'static Histogram) -> Self {
        Self {
            started_at: Instant::now(),
            histogram,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.histogram
            .observe(self.started_at.elapsed().as_millis() as u64);
    }
}

pub fn log_snapshot() {
    tracing::info!(
        total_errors = INDEXER_METRICS.total_errors.get(),
        height_success = INDEXER_METRICS.height_success.get(),
        height_duration_avg_ms = INDEXER_METRICS.height_duration.avg(),
        height_duration_max_ms = INDEXER_METRICS.height_duration.max(),
        db_size_after_height_avg = INDEXER_METRICS.db_size_after_height.avg(),
        use_case_duration_avg_ms = INDEXER_METRICS.use_case_duration.avg(),
        "indexer metrics"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_tracks_count_avg_and_max() {
        let histogram = Histogram::default();
        histogram.observe(10);
        histogram.observe(30);

        assert_eq!(histogram.count(), 2);
        assert_eq!(histogram.avg(), 20);
        assert_eq!(histogram.max(), 30);
    }
}
