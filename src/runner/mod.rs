//! Run orchestration: sequential probing, partitioning, summary build.
//!
//! A run walks the registry in order, probes each endpoint exactly once, and
//! splits the results into active and inactive partitions that keep registry
//! order. One bad endpoint never stops the walk; the only thing that does is
//! a user interrupt.

use crate::probes::{Probe, ProbeOutcome};
use crate::registry::Endpoint;
use crate::report::{self, Palette};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of probing one endpoint, as persisted in the results file. Field
/// order is the wire schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub name: String,
    pub url: String,
    pub description: String,
    pub response_time: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeRecord {
    /// Merge an endpoint with its probe outcome, stamping the capture time.
    pub fn capture(endpoint: &Endpoint, outcome: &ProbeOutcome) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            description: endpoint.description.clone(),
            response_time: outcome.elapsed_seconds,
            timestamp: Utc::now(),
            error: outcome.failure.as_ref().map(ToString::to_string),
        }
    }
}

/// One full pass over the registry. Field order is the wire schema of the
/// results file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub total_apis: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub active_apis: Vec<ProbeRecord>,
    pub inactive_apis: Vec<ProbeRecord>,
}

impl RunSummary {
    /// Build a summary from the two partitions, stamping the current time.
    /// The stamp lands after every record timestamp because records are
    /// captured during the walk and this runs after it.
    pub fn new(active_apis: Vec<ProbeRecord>, inactive_apis: Vec<ProbeRecord>) -> Self {
        Self {
            timestamp: Utc::now(),
            total_apis: active_apis.len() + inactive_apis.len(),
            active_count: active_apis.len(),
            inactive_count: inactive_apis.len(),
            active_apis,
            inactive_apis,
        }
    }

    /// Process exit code for this run: 0 only when nothing is inactive.
    pub fn exit_code(&self) -> u8 {
        if self.inactive_count == 0 {
            0
        } else {
            1
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Ctrl-C arrived before the walk finished. No results file is written
    /// for an interrupted run.
    Interrupted,
}

/// Probe every endpoint in order. When a palette is supplied, the header and
/// one line per endpoint are printed as the walk progresses; `None` keeps
/// stdout untouched for machine output.
pub async fn run(
    probe: &dyn Probe,
    endpoints: &[Endpoint],
    timeout: Duration,
    console: Option<&Palette>,
) -> RunOutcome {
    if let Some(p) = console {
        println!("{}", report::format_header(p));
    }

    // One pinned listener for the whole walk, so a Ctrl-C that lands between
    // probes is still caught by the next select.
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => (),
            Err(err) => {
                tracing::warn!(%err, "Ctrl-C handler unavailable; run cannot be interrupted");
                std::future::pending::<()>().await
            }
        }
    };
    tokio::pin!(interrupt);

    let mut active = Vec::new();
    let mut inactive = Vec::new();

    for endpoint in endpoints {
        let outcome = tokio::select! {
            outcome = probe.probe(endpoint, timeout) => outcome,
            _ = &mut interrupt => return RunOutcome::Interrupted,
        };

        let record = ProbeRecord::capture(endpoint, &outcome);
        tracing::debug!(
            name = %endpoint.name,
            success = outcome.is_success(),
            elapsed_seconds = outcome.elapsed_seconds,
            "Probe finished"
        );

        if let Some(p) = console {
            println!("{}", report::format_probe_line(p, &endpoint.name, &outcome));
        }

        if outcome.is_success() {
            active.push(record);
        } else {
            inactive.push(record);
        }
    }

    RunOutcome::Completed(RunSummary::new(active, inactive))
}
