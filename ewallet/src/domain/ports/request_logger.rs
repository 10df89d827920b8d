//! Optional sink for the per-call request/response log lines.

use tracing::info;

/// Receives one formatted line before a request is sent and one after its
/// response arrives. Lines are already tagged and newline-terminated.
#[cfg_attr(test, mockall::automock)]
pub trait RequestLogger: Send + Sync {
    /// Record one log line.
    fn info(&self, line: &str);
}

/// Logger forwarding request lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRequestLogger;

impl RequestLogger for TracingRequestLogger {
    fn info(&self, line: &str) {
        info!(target: "ewallet::requests", "{}", line.trim_end());
    }
}
