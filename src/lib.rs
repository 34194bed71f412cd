//! nasacheck -- availability checker for the NASA Earth-science APIs.
//!
//! This crate probes a registry of HTTP endpoints one at a time, classifies
//! each outcome (active, timeout, connection failure, bad status), renders a
//! console report, and persists a JSON summary of the run.

pub mod probes;
pub mod registry;
pub mod report;
pub mod runner;
pub mod storage;
