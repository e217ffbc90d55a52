use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, TextEncoder, register_counter,
    register_counter_vec, register_gauge, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: CounterVec = register_counter_vec!(
        "party_game_requests_total",
        "Total number of generation requests",
        &["kind"]
    )
    .unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("party_game_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("party_game_cache_misses_total", "Total cache misses").unwrap();
    pub static ref GENERATION_FAILURES: Counter = register_counter!(
        "party_game_generation_attempt_failures_total",
        "Failed attempts against the model"
    )
    .unwrap();
    pub static ref RATE_LIMITED: Counter = register_counter!(
        "party_game_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "party_game_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("party_game_cache_size", "Current number of items in cache").unwrap();
}

// Text exposition of every registered metric
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
