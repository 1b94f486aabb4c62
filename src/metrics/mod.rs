//! Metrics emitted by the broker
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! application installs a recorder.

/// Counter metrics
pub mod counters {
    use crate::broker::EndpointKind;

    /// One transport connection attempt started
    pub fn connect_attempt(kind: EndpointKind) {
        metrics::counter!("cache_broker_connect_attempts_total", "transport" => kind.as_str())
            .increment(1);
    }

    /// A candidate was given up on
    pub fn candidate_failed(kind: EndpointKind) {
        metrics::counter!("cache_broker_candidate_failures_total", "transport" => kind.as_str())
            .increment(1);
    }

    /// A connection was handed to the caller
    pub fn connect_succeeded(kind: EndpointKind) {
        metrics::counter!("cache_broker_connects_total", "transport" => kind.as_str())
            .increment(1);
    }

    /// A whole `connect` call failed
    pub fn candidates_exhausted() {
        metrics::counter!("cache_broker_exhausted_total").increment(1);
    }
}

/// Histogram metrics
pub mod histograms {
    use crate::broker::EndpointKind;
    use std::time::Duration;

    /// Time spent on one candidate, all attempts included
    pub fn connect_duration(kind: EndpointKind, elapsed: Duration) {
        metrics::histogram!("cache_broker_connect_duration_ms", "transport" => kind.as_str())
            .record(millis(elapsed) as f64);
    }

    /// Whole milliseconds, saturating at `u64::MAX`
    pub(crate) fn millis(elapsed: Duration) -> u64 {
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
