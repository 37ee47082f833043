//! In-memory latency histograms for store round-trips.
//! Handlers record, /stats/latency reads.

use std::sync::Mutex;
use std::time::Duration;

use hdrhistogram::Histogram;
use serde::Serialize;

/// Percentile snapshot of one histogram. Values in microseconds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatencyPercentiles {
    pub count: u64,
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
}

impl LatencyPercentiles {
    fn empty() -> Self {
        Self {
            count: 0,
            p50_us: None,
            p95_us: None,
            p99_us: None,
        }
    }
}

/// Store round-trip latency, split by path: writes (ingestion inserts) and
/// reads (latest-row queries).
pub struct StoreLatency {
    writes: Mutex<Histogram<u64>>,
    reads: Mutex<Histogram<u64>>,
}

impl StoreLatency {
    /// Tracks 1us to 100s, 3 significant figures.
    pub fn new() -> Self {
        let histogram =
            || Histogram::new_with_bounds(1, 100_000_000, 3).expect("valid histogram bounds");
        Self {
            writes: Mutex::new(histogram()),
            reads: Mutex::new(histogram()),
        }
    }

    pub fn record_write(&self, d: Duration) {
        Self::record(&self.writes, d);
    }

    pub fn record_read(&self, d: Duration) {
        Self::record(&self.reads, d);
    }

    fn record(histogram: &Mutex<Histogram<u64>>, d: Duration) {
        let us = d.as_micros().clamp(1, u128::from(u64::MAX)) as u64;
        if let Ok(mut h) = histogram.lock() {
            let _ = h.record(us);
        }
    }

    pub fn write_percentiles(&self) -> LatencyPercentiles {
        Self::percentiles(&self.writes)
    }

    pub fn read_percentiles(&self) -> LatencyPercentiles {
        Self::percentiles(&self.reads)
    }

    fn percentiles(histogram: &Mutex<Histogram<u64>>) -> LatencyPercentiles {
        let Ok(h) = histogram.lock() else {
            return LatencyPercentiles::empty();
        };
        if h.len() == 0 {
            return LatencyPercentiles::empty();
        }
        LatencyPercentiles {
            count: h.len(),
            p50_us: Some(h.value_at_quantile(0.5)),
            p95_us: Some(h.value_at_quantile(0.95)),
            p99_us: Some(h.value_at_quantile(0.99)),
        }
    }
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histograms_report_no_percentiles() {
        let latency = StoreLatency::new();
        let p = latency.write_percentiles();
        assert_eq!(p.count, 0);
        assert!(p.p50_us.is_none());
    }

    #[test]
    fn recorded_samples_show_up_on_the_right_path() {
        let latency = StoreLatency::new();
        latency.record_write(Duration::from_micros(250));
        latency.record_write(Duration::from_micros(750));

        let writes = latency.write_percentiles();
        assert_eq!(writes.count, 2);
        assert!(writes.p50_us.is_some());
        assert!(writes.p99_us.unwrap() >= writes.p50_us.unwrap());

        let reads = latency.read_percentiles();
        assert_eq!(reads.count, 0);
    }

    #[test]
    fn sub_microsecond_durations_still_record() {
        let latency = StoreLatency::new();
        latency.record_read(Duration::from_nanos(10));
        assert_eq!(latency.read_percentiles().count, 1);
    }
}
