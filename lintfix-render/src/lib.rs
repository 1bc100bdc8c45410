//! Rendering helpers (markdown and console text) for lintfix reports.

use lintfix_types::report::{LintfixReport, ReportStatus};

pub fn render_check_md(report: &LintfixReport) -> String {
    let mut out = String::new();
    out.push_str("# lintfix check\n\n");
    push_summary(&mut out, report);

    out.push_str("## Rules\n\n");
    if report.rules.is_empty() {
        out.push_str("_No rules ran._\n");
    } else {
        for (i, row) in report.rules.iter().enumerate() {
            out.push_str(&format!(
                "{}. `{}` — {} changes",
                i + 1,
                row.label,
                row.changes
            ));
            if !row.description.is_empty() {
                out.push_str(&format!(" — {}", row.description));
            }
            out.push('\n');
        }
    }

    push_warnings_and_failures(&mut out, report);
    out
}

pub fn render_apply_md(report: &LintfixReport) -> String {
    let mut out = String::new();
    out.push_str("# lintfix apply\n\n");
    push_summary(&mut out, report);

    out.push_str("## Rules\n\n");
    if report.rules.is_empty() {
        out.push_str("_No rules ran._\n");
    } else {
        for (i, row) in report.rules.iter().enumerate() {
            out.push_str(&format!(
                "{}. `{}` — {} changes",
                i + 1,
                row.label,
                row.changes
            ));
            if !row.description.is_empty() {
                out.push_str(&format!(" — {}", row.description));
            }
            out.push('\n');
        }
    }

    if !report.written.is_empty() {
        out.push_str("\n## Written files\n\n");
        for w in &report.written {
            out.push_str(&format!(
                "- `{}` {} → {}\n",
                w.path, w.sha256_before, w.sha256_after
            ));
        }
    }

    push_warnings_and_failures(&mut out, report);
    out
}

/// Console listing for a check run. Empty when there is nothing to fix.
pub fn render_check_text(report: &LintfixReport) -> String {
    if report.verdict.counts.changes == 0 {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("\u{2716} Your source code requires refactoring.\n");
    out.push_str("Run `lintfix apply` to automatically fix.\n");
    push_listing(&mut out, report);
    out
}

/// Console listing for an apply run. Empty when nothing was changed.
pub fn render_apply_text(report: &LintfixReport) -> String {
    if report.verdict.counts.changes == 0 {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(
        "\u{2716} Your source code required refactoring. Please review changes and commit.\n",
    );
    push_listing(&mut out, report);
    out
}

fn push_listing(out: &mut String, report: &LintfixReport) {
    for (i, row) in report.rules.iter().enumerate() {
        out.push_str(&format!(
            "   {}. {} requires {} changes to {}\n",
            i + 1,
            row.label,
            row.changes,
            if row.description.is_empty() {
                "sources"
            } else {
                row.description.as_str()
            }
        ));
    }
}

fn push_summary(out: &mut String, report: &LintfixReport) {
    out.push_str(&format!("- Status: `{}`\n", status_label(report.verdict.status)));
    out.push_str(&format!("- Rules: {}\n", report.verdict.counts.rules));
    out.push_str(&format!("- Changes: {}\n", report.verdict.counts.changes));
    out.push_str(&format!("- Failures: {}\n\n", report.verdict.counts.failures));
}

fn push_warnings_and_failures(out: &mut String, report: &LintfixReport) {
    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {}\n", w));
        }
    }

    if !report.failures.is_empty() {
        out.push_str("\n## Failures\n\n");
        for f in &report.failures {
            out.push_str(&format!("- `{}` ({}): {}\n", f.path, f.kind, f.message));
        }
    }
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pass => "pass",
        ReportStatus::Warn => "warn",
        ReportStatus::Fail => "fail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintfix_types::report::{
        ReportCounts, ReportFailure, ReportRunInfo, ReportToolInfo, ReportVerdict, ReportWrite,
        RuleStatRow,
    };

    fn report(changes: u64, rules: Vec<RuleStatRow>) -> LintfixReport {
        LintfixReport {
            schema: lintfix_types::schema::LINTFIX_REPORT_V1.to_string(),
            tool: ReportToolInfo {
                name: "lintfix".to_string(),
                version: "0.0.0".to_string(),
                commit: None,
            },
            run: ReportRunInfo {
                started_at: "2026-01-01T00:00:00Z".to_string(),
                ended_at: None,
                duration_ms: None,
            },
            verdict: ReportVerdict {
                status: if changes > 0 {
                    ReportStatus::Warn
                } else {
                    ReportStatus::Pass
                },
                counts: ReportCounts {
                    rules: rules.len() as u64,
                    changes,
                    failures: 0,
                },
                reasons: vec![],
            },
            rules,
            warnings: vec![],
            failures: vec![],
            written: vec![],
            artifacts: None,
        }
    }

    fn row(label: &str, description: &str, changes: u64) -> RuleStatRow {
        RuleStatRow {
            label: label.to_string(),
            description: description.to_string(),
            changes,
        }
    }

    #[test]
    fn check_text_lists_rules_with_fix_hint() {
        let report = report(
            3,
            vec![
                row("guava-deprecations", "fix Guava deprecations", 2),
                row("charsets", "", 1),
            ],
        );

        let text = render_check_text(&report);
        assert!(text.starts_with("\u{2716} Your source code requires refactoring.\n"));
        assert!(text.contains("Run `lintfix apply` to automatically fix."));
        assert!(text.contains("   1. guava-deprecations requires 2 changes to fix Guava deprecations"));
        assert!(text.contains("   2. charsets requires 1 changes to sources"));
    }

    #[test]
    fn check_text_is_empty_when_clean() {
        let report = report(0, vec![row("ran-clean", "", 0)]);
        assert_eq!(render_check_text(&report), "");
    }

    #[test]
    fn apply_text_asks_for_review() {
        let report = report(1, vec![row("guava-deprecations", "", 1)]);
        let text = render_apply_text(&report);
        assert!(text.contains("Please review changes and commit."));
    }

    #[test]
    fn check_md_renders_placeholder_without_rules() {
        let text = render_check_md(&report(0, vec![]));
        assert!(text.starts_with("# lintfix check\n"));
        assert!(text.contains("_No rules ran._"));
        assert!(text.contains("- Status: `pass`"));
    }

    #[test]
    fn apply_md_lists_written_files() {
        let mut r = report(1, vec![row("guava-deprecations", "", 1)]);
        r.written = vec![ReportWrite {
            path: "src/A.java".to_string(),
            sha256_before: "aa".to_string(),
            sha256_after: "bb".to_string(),
        }];

        let text = render_apply_md(&r);
        assert!(text.contains("## Written files"));
        assert!(text.contains("- `src/A.java` aa → bb"));
    }

    #[test]
    fn failures_section_renders_kind_and_message() {
        let mut r = report(0, vec![]);
        r.failures = vec![ReportFailure {
            path: "src/A.java".to_string(),
            kind: "rule".to_string(),
            message: "rule `x` failed: boom".to_string(),
        }];

        let text = render_check_md(&r);
        assert!(text.contains("## Failures"));
        assert!(text.contains("- `src/A.java` (rule): rule `x` failed: boom"));
    }
}
