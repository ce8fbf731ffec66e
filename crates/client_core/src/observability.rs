//! Failure reporting seam.
//!
//! Network-layer failures stop at the controller that caught them and are
//! handed to a [`FailureSink`]. Nothing is shown to the user; stale data stays
//! on screen and nothing is retried.

use std::fmt;

use shared::error::ConsoleError;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    Simulate,
    LoadHistory,
    LoadLeaders,
}

impl FailureContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::LoadHistory => "load_history",
            Self::LoadLeaders => "load_leaders",
        }
    }
}

impl fmt::Display for FailureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait FailureSink: Send + Sync {
    fn report(&self, context: FailureContext, error: &ConsoleError);
}

/// Logs failures through `tracing`.
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn report(&self, context: FailureContext, err: &ConsoleError) {
        error!(
            context = context.as_str(),
            kind = err.kind().as_str(),
            "console request failed: {err}"
        );
    }
}
