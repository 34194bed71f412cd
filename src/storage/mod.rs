//! Results persistence -- one pretty-printed JSON document per run.

use crate::runner::RunSummary;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write the run summary to `path`. Persistence is the last step of a run
/// and best-effort: callers report a failure on the console and move on, so
/// a full disk or bad path never changes the exit code.
pub fn save(summary: &RunSummary, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Run summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ProbeRecord;

    fn record(name: &str, error: Option<&str>) -> ProbeRecord {
        ProbeRecord {
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            description: "test".to_string(),
            response_time: 1.25,
            timestamp: chrono::Utc::now(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");

        let summary = RunSummary::new(
            vec![record("up", None)],
            vec![record("down", Some("HTTP 500"))],
        );
        save(&summary, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let reread: RunSummary = serde_json::from_str(&raw).unwrap();
        assert_eq!(reread.total_apis, 2);
        assert_eq!(reread.active_count + reread.inactive_count, reread.total_apis);
        assert_eq!(reread.inactive_apis[0].error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_save_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("status.json");

        let summary = RunSummary::new(vec![record("up", None)], vec![]);
        let err = save(&summary, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
