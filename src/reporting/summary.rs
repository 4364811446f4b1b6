// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::types::HuntReport;
use anyhow::Result;

/// Human-readable end-of-run summary
pub fn render_text(report: &HuntReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Hunt finished for {}\n", report.target));
    out.push_str(&format!("  Pages discovered: {}\n", report.pages_discovered));
    out.push_str(&format!(
        "  Pages fetched:    {} ({} failed)\n",
        report.pages_fetched, report.fetch_failures
    ));
    out.push_str(&format!("  Out of scope:     {}\n", report.out_of_scope));
    out.push_str(&format!(
        "  Probes sent:      {} ({} failed)\n",
        report.probes_sent, report.probe_failures
    ));
    out.push_str(&format!("  Duration:         {:.1}s\n", report.duration_ms as f64 / 1000.0));

    if report.matches.is_empty() {
        out.push_str("  No webshell candidates found\n");
    } else {
        out.push_str(&format!("  Matches:          {}\n", report.matches.len()));
        for m in &report.matches {
            out.push_str(&format!("    [{}] {}\n", m.status_code, m.url));
        }
    }

    out
}

pub fn render_json(report: &HuntReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchResult;

    fn sample() -> HuntReport {
        HuntReport {
            target: "http://example.com/".to_string(),
            pages_discovered: 3,
            pages_fetched: 3,
            fetch_failures: 1,
            out_of_scope: 2,
            probes_sent: 6,
            probe_failures: 0,
            matches: vec![MatchResult {
                url: "http://example.com/shell.php".to_string(),
                status_code: 200,
            }],
            duration_ms: 1500,
        }
    }

    #[test]
    fn test_render_text_lists_matches() {
        let text = render_text(&sample());
        assert!(text.contains("Hunt finished for http://example.com/"));
        assert!(text.contains("Pages fetched:    3 (1 failed)"));
        assert!(text.contains("[200] http://example.com/shell.php"));
        assert!(text.contains("1.5s"));
    }

    #[test]
    fn test_render_text_without_matches() {
        let mut report = sample();
        report.matches.clear();
        assert!(render_text(&report).contains("No webshell candidates found"));
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["probesSent"], 6);
        assert_eq!(value["matches"][0]["statusCode"], 200);
    }
}
