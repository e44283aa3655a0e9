use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry), labelled by backend
pub static LOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "quiz_store_loads_total",
        "Total collection loads",
        &["backend"]
    )
    .expect("register loads_total")
});

pub static LOAD_FALLBACKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "quiz_store_load_fallbacks_total",
        "Loads answered with an empty collection because storage failed",
        &["backend"]
    )
    .expect("register load_fallbacks_total")
});

pub static SAVES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "quiz_store_saves_total",
        "Total successful replace-all operations",
        &["backend"]
    )
    .expect("register saves_total")
});

pub static SAVE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "quiz_store_save_failures_total",
        "Total failed replace-all operations",
        &["backend"]
    )
    .expect("register save_failures_total")
});

pub static SAVE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "quiz_store_save_duration_seconds",
        "Replace-all duration in seconds",
        &["backend"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register save_duration")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> (u16, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (500, format!("metrics encode error: {e}"));
    }
    (200, String::from_utf8(buffer).unwrap_or_default())
}
