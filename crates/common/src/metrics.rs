use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static CONTENT_READS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "portal_content_reads_total",
        "Content category reads served by the data service",
        &["category", "outcome"]
    )
    .expect("register content_reads_total")
});

pub static CONTENT_WRITES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "portal_content_writes_total",
        "Content category writes (replace, upsert, delete)",
        &["category", "op", "outcome"]
    )
    .expect("register content_writes_total")
});

pub static LOGIN_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "portal_login_attempts_total",
        "Admin login attempts",
        &["outcome"]
    )
    .expect("register login_attempts_total")
});

pub fn record_read(category: &str, ok: bool) {
    CONTENT_READS_TOTAL
        .with_label_values(&[category, outcome(ok)])
        .inc();
}

pub fn record_write(category: &str, op: &str, ok: bool) {
    CONTENT_WRITES_TOTAL
        .with_label_values(&[category, op, outcome(ok)])
        .inc();
}

pub fn record_login(ok: bool) {
    LOGIN_ATTEMPTS_TOTAL.with_label_values(&[outcome(ok)]).inc();
}

fn outcome(ok: bool) -> &'static str {
    if ok { "ok" } else { "error" }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
