//! Probe types and the probe trait.
//!
//! A probe is one GET request against an endpoint with a bounded timeout.
//! Endpoint-level failures are classified into [`ProbeOutcome`], never
//! returned as errors: a dead endpoint is data, not a fault.

pub mod http;

use crate::registry::Endpoint;
use std::time::Duration;
use thiserror::Error;

/// Why a probe failed. The `Display` strings are the exact error details
/// recorded in console lines and the results file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("Timeout")]
    Timeout,

    #[error("Connection Error")]
    Connection,

    #[error("Request Error: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

/// Outcome of probing a single endpoint. Created once, never mutated.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Wall-clock seconds attributed to the probe. Timeouts report the
    /// configured bound; connection and transport failures report zero.
    pub elapsed_seconds: f64,
    pub failure: Option<ProbeFailure>,
}

impl ProbeOutcome {
    pub fn success(elapsed_seconds: f64) -> Self {
        Self {
            elapsed_seconds,
            failure: None,
        }
    }

    pub fn failed(elapsed_seconds: f64, failure: ProbeFailure) -> Self {
        Self {
            elapsed_seconds,
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Error detail string; empty iff the probe succeeded.
    pub fn error_detail(&self) -> String {
        self.failure
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Trait for endpoint probes.
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Probe one endpoint, bounded by `timeout`. Exactly one attempt; the
    /// call blocks its task for up to the timeout.
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> ProbeOutcome;
}
