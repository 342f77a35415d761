//! Prometheus Metrics
//!
//! Process-wide metrics registered against the default registry and
//! exposed by the metrics listener in text format.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

/// HTTP requests handled, by method and response status.
pub static REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "transrelay_requests_total",
        "Total HTTP requests handled",
        &["method", "status"]
    )
    .expect("metric registration")
});

/// Translations answered from the cache.
pub static CACHE_HITS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "transrelay_cache_hits_total",
        "Translations served from the result cache"
    )
    .expect("metric registration")
});

/// Translations that had to invoke the backend.
pub static CACHE_MISSES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "transrelay_cache_misses_total",
        "Translations not found in the result cache"
    )
    .expect("metric registration")
});

/// Current number of cached translations.
pub static CACHE_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "transrelay_cache_entries",
        "Entries currently held by the result cache"
    )
    .expect("metric registration")
});

/// Entries evicted from the cache since process start.
pub static CACHE_EVICTIONS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "transrelay_cache_evictions",
        "Entries evicted from the result cache since start"
    )
    .expect("metric registration")
});

/// Failed calls to the translation backend.
pub static TRANSLATE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "transrelay_translate_failures_total",
        "Failed translation backend calls"
    )
    .expect("metric registration")
});

/// Failed audit object writes.
pub static AUDIT_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "transrelay_audit_failures_total",
        "Failed audit store writes"
    )
    .expect("metric registration")
});

/// Latency of translation backend calls.
pub static TRANSLATE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "transrelay_translate_duration_seconds",
        "Translation backend call latency"
    )
    .expect("metric registration")
});

/// Force registration of every metric so the first scrape sees them all.
pub fn init() {
    Lazy::force(&REQUESTS);
    Lazy::force(&CACHE_HITS);
    Lazy::force(&CACHE_MISSES);
    Lazy::force(&CACHE_ENTRIES);
    Lazy::force(&CACHE_EVICTIONS);
    Lazy::force(&TRANSLATE_FAILURES);
    Lazy::force(&AUDIT_FAILURES);
    Lazy::force(&TRANSLATE_DURATION);
}

// =============================================================================
// Tests
// =============================================================================
