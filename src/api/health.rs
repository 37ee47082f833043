//! Shared health state for the /health endpoint.
//! Updated by the ingestion handlers, read by the API.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Ingestion counters. Relaxed ordering; values are advisory and never affect
/// request semantics.
#[derive(Default)]
pub struct HealthState {
    /// Readings accepted since startup.
    pub readings_ingested: AtomicU64,
    /// Global-rate batches accepted since startup.
    pub rate_batches_ingested: AtomicU64,
    /// Unix seconds of the last successful insert (0 = none yet).
    pub last_ingest_at: AtomicI64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reading(&self, now: i64) {
        self.readings_ingested.fetch_add(1, Ordering::Relaxed);
        self.last_ingest_at.store(now, Ordering::Relaxed);
    }

    pub fn record_rate_batch(&self, now: i64) {
        self.rate_batches_ingested.fetch_add(1, Ordering::Relaxed);
        self.last_ingest_at.store(now, Ordering::Relaxed);
    }

    pub fn readings_ingested(&self) -> u64 {
        self.readings_ingested.load(Ordering::Relaxed)
    }

    pub fn rate_batches_ingested(&self) -> u64 {
        self.rate_batches_ingested.load(Ordering::Relaxed)
    }

    pub fn last_ingest_at(&self) -> i64 {
        self.last_ingest_at.load(Ordering::Relaxed)
    }
}
