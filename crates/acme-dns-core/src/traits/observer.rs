//! Solver observer
//!
//! The solver reports progress and failures through a [`SolverObserver`]
//! handed to it at construction. The core never installs a global logger.

/// Write-only sink for solver messages
pub trait SolverObserver: Send + Sync {
    /// Record a single message
    fn record(&self, message: &str);
}

/// Observer that forwards every message to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SolverObserver for TracingObserver {
    fn record(&self, message: &str) {
        tracing::info!(target: "acme_dns::solver", "{}", message);
    }
}
