use std::time::Duration;

use metrics::{counter, histogram};

/// Metrics collector for the HTTP API. Without an installed recorder the
/// calls are no-ops.
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "wit_server",
        }
    }

    /// Record a listing request
    pub fn listing_requested(&self) {
        counter!(format!("{}.listing.requests", self.prefix)).increment(1);
    }

    /// Record the number of work items returned by one listing
    pub fn listing_served(&self, items: usize) {
        histogram!(format!("{}.listing.items", self.prefix)).record(items as f64);
    }

    /// Record a failed request, by error code
    pub fn error_occurred(&self, code: &str) {
        counter!(format!("{}.listing.errors", self.prefix)).increment(1);
        counter!(format!("{}.listing.errors.{}", self.prefix, code)).increment(1);
    }

    /// Record listing latency
    pub fn listing_latency(&self, duration: Duration) {
        histogram!(format!("{}.listing.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
