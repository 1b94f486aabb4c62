//! Diagnostic line emitted when every candidate fails

use super::endpoint::Candidates;
use std::sync::Arc;

/// Operation identity written into diagnostic lines
pub(crate) const OPERATION: &str = "cache_broker::Broker::connect";

/// Destination for the one-line report of a failed `connect`
///
/// Emission is fire-and-forget: the broker ignores whatever happens inside
/// the sink.
pub trait DiagnosticSink: Send + Sync {
    /// Record `line` under `category`
    fn emit(&self, line: &str, category: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn emit(&self, line: &str, category: &str) {
        (**self).emit(line, category)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn emit(&self, line: &str, category: &str) {
        (**self).emit(line, category)
    }
}

/// Default sink: an `error` event on the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, line: &str, category: &str) {
        tracing::error!(target: "cache_broker::diagnostic", category, "{}", line);
    }
}

/// Build the report line
///
/// `<timestamp> <operation>: connect error to host=<candidates>:<port>`,
/// lists rendered in full.
pub(crate) fn format_line(timestamp: &str, candidates: &Candidates, port: u16) -> String {
    format!(
        "{} {}: connect error to host={}:{}",
        timestamp, OPERATION, candidates, port
    )
}

/// Local time as `YYYY-MM-DD HH:MM:SS`
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_single() {
        let line = format_line("2024-05-01 10:00:00", &Candidates::from("10.0.0.9"), 6387);
        assert_eq!(
            line,
            "2024-05-01 10:00:00 cache_broker::Broker::connect: connect error to host=10.0.0.9:6387"
        );
    }

    #[test]
    fn test_format_line_list_rendered_fully() {
        let candidates = Candidates::from(["/var/run/proxy.sock", "10.0.0.5", "10.0.0.6"]);
        let line = format_line("2024-05-01 10:00:00", &candidates, 6379);
        assert!(line.contains("[\"/var/run/proxy.sock\", \"10.0.0.5\", \"10.0.0.6\"]:6379"));
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_arc_sink_forwards() {
        let recording = crate::broker::mock::RecordingSink::default();
        let sink: Arc<dyn DiagnosticSink> = Arc::new(recording.clone());
        sink.emit("line", "cat");
        assert_eq!(recording.lines(), vec![("line".to_string(), "cat".to_string())]);
    }
}
