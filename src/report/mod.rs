//! Console report formatting.
//!
//! Every function here returns a `String`; callers decide when to print.
//! Styling goes through a [`Palette`] resolved once at startup, whose fields
//! are all empty in plain mode so format code never branches on color
//! support.

use crate::probes::ProbeOutcome;
use crate::runner::RunSummary;
use std::fmt::Display;
use std::io::IsTerminal;

/// ANSI styling table for the report stream.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Palette {
    /// Bright ANSI colors.
    pub fn ansi() -> Self {
        Self {
            green: "\x1b[92m",
            red: "\x1b[91m",
            yellow: "\x1b[93m",
            blue: "\x1b[94m",
            bold: "\x1b[1m",
            reset: "\x1b[0m",
        }
    }

    /// No styling; every field renders as nothing.
    pub fn plain() -> Self {
        Self {
            green: "",
            red: "",
            yellow: "",
            blue: "",
            bold: "",
            reset: "",
        }
    }

    /// Pick a palette for stdout: ANSI on a terminal unless `NO_COLOR` asks
    /// otherwise, plain for pipes and files.
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
            Self::plain()
        } else {
            Self::ansi()
        }
    }
}

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Header printed before the first probe.
pub fn format_header(p: &Palette) -> String {
    format!("{}{}Testing NASA APIs...{}\n{}", p.bold, p.blue, p.reset, rule())
}

/// One line per probed endpoint, printed as soon as its probe returns.
pub fn format_probe_line(p: &Palette, name: &str, outcome: &ProbeOutcome) -> String {
    if outcome.is_success() {
        format!(
            "{}[OK] {} - Active (Response time: {:.2}s){}",
            p.green, name, outcome.elapsed_seconds, p.reset
        )
    } else {
        format!(
            "{}[FAIL] {} - Inactive ({}){}",
            p.red,
            name,
            outcome.error_detail(),
            p.reset
        )
    }
}

/// Aggregate block printed after the last probe.
pub fn format_summary(p: &Palette, summary: &RunSummary) -> String {
    let mut lines = vec![
        String::new(),
        rule(),
        format!("{}SUMMARY:{}", p.bold, p.reset),
        format!(
            "Active APIs: {}/{}",
            summary.active_count, summary.total_apis
        ),
    ];

    if !summary.active_apis.is_empty() {
        lines.push(format!("{}[OK] Active APIs:{}", p.green, p.reset));
        for api in &summary.active_apis {
            lines.push(format!("  - {}", api.name));
        }
    }

    if !summary.inactive_apis.is_empty() {
        lines.push(format!("{}[FAIL] Inactive APIs:{}", p.red, p.reset));
        for api in &summary.inactive_apis {
            let detail = api.error.as_deref().unwrap_or("unknown");
            lines.push(format!("  - {} ({})", api.name, detail));
        }
    }

    lines.join("\n")
}

/// Confirmation printed once the results file is on disk.
pub fn format_saved(p: &Palette, path: &str) -> String {
    format!("\n{}Results saved to {}{}", p.blue, path, p.reset)
}

pub fn format_save_error(p: &Palette, err: impl Display) -> String {
    format!("\n{}Error saving results to JSON: {}{}", p.red, err, p.reset)
}

/// Final status line for a user-aborted run.
pub fn format_interrupted(p: &Palette) -> String {
    format!("\n{}Testing interrupted by user{}", p.yellow, p.reset)
}

/// Final status line for an unhandled top-level failure.
pub fn format_unexpected(p: &Palette, err: impl Display) -> String {
    format!("\n{}Unexpected error: {}{}", p.red, err, p.reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::ProbeFailure;
    use crate::runner::ProbeRecord;

    fn record(name: &str, error: Option<&str>) -> ProbeRecord {
        ProbeRecord {
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            description: "test".to_string(),
            response_time: 0.5,
            timestamp: chrono::Utc::now(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_probe_line_active() {
        let p = Palette::plain();
        let line = format_probe_line(&p, "CMR API", &ProbeOutcome::success(0.5));
        assert_eq!(line, "[OK] CMR API - Active (Response time: 0.50s)");
    }

    #[test]
    fn test_probe_line_inactive() {
        let p = Palette::plain();
        let outcome = ProbeOutcome::failed(10.0, ProbeFailure::Timeout);
        let line = format_probe_line(&p, "EONET (Natural Events)", &outcome);
        assert_eq!(line, "[FAIL] EONET (Natural Events) - Inactive (Timeout)");
    }

    #[test]
    fn test_probe_line_carries_ansi_codes() {
        let p = Palette::ansi();
        let line = format_probe_line(&p, "CMR API", &ProbeOutcome::success(0.5));
        assert!(line.starts_with("\x1b[92m"));
        assert!(line.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_summary_block_lists_both_partitions() {
        let p = Palette::plain();
        let summary = RunSummary::new(
            vec![record("CMR API", None)],
            vec![record("SEDAC Main Website", Some("HTTP 502"))],
        );
        let text = format_summary(&p, &summary);

        assert!(text.contains("SUMMARY:"));
        assert!(text.contains("Active APIs: 1/2"));
        assert!(text.contains("[OK] Active APIs:"));
        assert!(text.contains("  - CMR API"));
        assert!(text.contains("[FAIL] Inactive APIs:"));
        assert!(text.contains("  - SEDAC Main Website (HTTP 502)"));
    }

    #[test]
    fn test_summary_block_omits_empty_partitions() {
        let p = Palette::plain();
        let all_active = RunSummary::new(vec![record("CMR API", None)], vec![]);
        let text = format_summary(&p, &all_active);
        assert!(text.contains("Active APIs: 1/1"));
        assert!(!text.contains("[FAIL] Inactive APIs:"));
    }

    #[test]
    fn test_status_messages() {
        let p = Palette::plain();
        assert_eq!(
            format_saved(&p, "nasa_api_status.json"),
            "\nResults saved to nasa_api_status.json"
        );
        assert_eq!(
            format_save_error(&p, "denied"),
            "\nError saving results to JSON: denied"
        );
        assert_eq!(format_interrupted(&p), "\nTesting interrupted by user");
        assert_eq!(
            format_unexpected(&p, "registry contains no endpoints"),
            "\nUnexpected error: registry contains no endpoints"
        );
    }
}
