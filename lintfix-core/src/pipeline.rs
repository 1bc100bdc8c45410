//! Core check and apply pipelines.
//!
//! These entry points are I/O-agnostic: source parsing and persistence
//! are performed through the port traits. Each invocation runs one
//! discovery pass over the configured rule bundles, applies the resulting
//! registry to every unit, and returns the aggregated change statistics;
//! the registry is discarded when the pass completes.

use crate::ports::{SourceUnit, UnitSource, WritePort};
use crate::settings::{ApplySettings, CheckSettings, RunMode};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use diffy::PatchFormatter;
use lintfix_bundles::load_artifacts;
use lintfix_render::{render_apply_md, render_check_md};
use lintfix_rules::{DiscoveryReport, DiscoveryWarning, RefactorContext, Resolver, RuleRegistry, discover_rules};
use lintfix_types::report::{
    LintfixReport, ReportArtifacts, ReportCounts, ReportFailure, ReportRunInfo, ReportStatus,
    ReportToolInfo, ReportVerdict, ReportWrite, RuleStatRow,
};
use lintfix_types::stats::ChangeStats;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A unit that failed during a pass. Other units' results remain valid.
#[derive(Debug)]
pub struct UnitFailure {
    pub path: Utf8PathBuf,
    pub kind: UnitFailureKind,
}

#[derive(Debug, thiserror::Error)]
pub enum UnitFailureKind {
    /// A rule's own logic failed while applying to the unit. The unit's
    /// contributions are dropped and it is never persisted.
    #[error("rule `{rule}` failed: {error:#}")]
    Rule { rule: String, error: anyhow::Error },

    /// Write-back failed after a successful rewrite.
    #[error("write-back failed: {error:#}")]
    Persist { error: anyhow::Error },
}

impl UnitFailureKind {
    fn report_kind(&self) -> &'static str {
        match self {
            UnitFailureKind::Rule { .. } => "rule",
            UnitFailureKind::Persist { .. } => "persist",
        }
    }
}

/// A unit persisted by a fix pass.
#[derive(Debug, Clone)]
pub struct WrittenUnit {
    pub path: Utf8PathBuf,
    pub sha256_before: String,
    pub sha256_after: String,
}

struct PassOutcome {
    stats: ChangeStats,
    failures: Vec<UnitFailure>,
    written: Vec<WrittenUnit>,
    patch: String,
}

/// Outcome of `run_check`.
pub struct CheckOutcome {
    pub stats: ChangeStats,
    pub failures: Vec<UnitFailure>,
    pub warnings: Vec<DiscoveryWarning>,
    pub patch: String,
    pub report: LintfixReport,
}

/// Run the check pipeline: discover rules, lint every unit, never persist.
///
/// A non-empty stats result is a normal outcome; the caller decides
/// whether it constitutes failure.
pub fn run_check(
    settings: &CheckSettings,
    units: &dyn UnitSource,
    resolver: &Resolver,
    tool: ReportToolInfo,
) -> anyhow::Result<CheckOutcome> {
    let artifacts = load_artifacts(&settings.rule_paths);
    let discovery = discover_rules(&artifacts, resolver);
    let parsed = units.parse_units().context("parse source units")?;

    debug!(
        units = parsed.len(),
        rules = discovery.registry.len(),
        "running lint pass"
    );
    let pass = rewrite_units(&parsed, &discovery.registry, RunMode::Lint, None);
    let report = report_from_pass(&pass, &discovery, RunMode::Lint, tool);

    Ok(CheckOutcome {
        stats: pass.stats,
        failures: pass.failures,
        warnings: discovery.warnings,
        patch: pass.patch,
        report,
    })
}

/// Outcome of `run_apply`.
pub struct ApplyOutcome {
    pub stats: ChangeStats,
    pub failures: Vec<UnitFailure>,
    pub warnings: Vec<DiscoveryWarning>,
    pub written: Vec<WrittenUnit>,
    pub report: LintfixReport,
}

/// Run the apply pipeline: discover rules, rewrite every unit, persist
/// each unit whose accumulated change count is positive.
pub fn run_apply(
    settings: &ApplySettings,
    units: &dyn UnitSource,
    resolver: &Resolver,
    writer: &dyn WritePort,
    tool: ReportToolInfo,
) -> anyhow::Result<ApplyOutcome> {
    let artifacts = load_artifacts(&settings.rule_paths);
    let discovery = discover_rules(&artifacts, resolver);
    let parsed = units.parse_units().context("parse source units")?;

    debug!(
        units = parsed.len(),
        rules = discovery.registry.len(),
        "running fix pass"
    );
    let pass = rewrite_units(&parsed, &discovery.registry, RunMode::Fix, Some(writer));
    let report = report_from_pass(&pass, &discovery, RunMode::Fix, tool);

    Ok(ApplyOutcome {
        stats: pass.stats,
        failures: pass.failures,
        warnings: discovery.warnings,
        written: pass.written,
        report,
    })
}

/// Apply every registry rule to every unit, in supplied order.
///
/// Rules for one unit share a single session, so later rules observe
/// earlier rules' queued edits; each rule's contribution is the delta in
/// queued edit totals across its own invocation. A failing rule drops the
/// whole unit (no stats, no write) while the remaining units still run.
fn rewrite_units(
    units: &[Box<dyn SourceUnit>],
    registry: &RuleRegistry,
    mode: RunMode,
    writer: Option<&dyn WritePort>,
) -> PassOutcome {
    let mut stats = ChangeStats::new();
    let mut failures = Vec::new();
    let mut written = Vec::new();
    let mut patch = String::new();
    let formatter = PatchFormatter::new();

    for unit in units {
        let mut ctx = unit.refactor();
        let original = ctx.render();

        let mut deltas: Vec<(String, u64)> = Vec::with_capacity(registry.len());
        let mut rule_failure = None;
        for descriptor in registry.iter() {
            let before = queued_total(ctx.as_ref());
            if let Err(error) = (descriptor.handler)(ctx.as_mut()) {
                rule_failure = Some(UnitFailure {
                    path: unit.path().to_path_buf(),
                    kind: UnitFailureKind::Rule {
                        rule: descriptor.info.label.clone(),
                        error,
                    },
                });
                break;
            }
            let after = queued_total(ctx.as_ref());
            deltas.push((descriptor.info.label.clone(), after.saturating_sub(before)));
        }

        if let Some(failure) = rule_failure {
            warn!(path = %failure.path, "{}", failure.kind);
            failures.push(failure);
            continue;
        }

        for (label, delta) in &deltas {
            stats.merge(label, *delta);
        }

        if queued_total(ctx.as_ref()) == 0 {
            continue;
        }

        let rendered = ctx.render();
        match mode {
            RunMode::Lint => {
                patch.push_str(&unit_patch(&formatter, unit.path(), &original, &rendered));
            }
            RunMode::Fix => {
                let Some(writer) = writer else { continue };
                match writer.write_file(unit.path(), rendered.as_bytes()) {
                    Ok(()) => written.push(WrittenUnit {
                        path: unit.path().to_path_buf(),
                        sha256_before: sha256_hex(original.as_bytes()),
                        sha256_after: sha256_hex(rendered.as_bytes()),
                    }),
                    Err(error) => {
                        let failure = UnitFailure {
                            path: unit.path().to_path_buf(),
                            kind: UnitFailureKind::Persist { error },
                        };
                        warn!(path = %failure.path, "{}", failure.kind);
                        failures.push(failure);
                    }
                }
            }
        }
    }

    PassOutcome {
        stats,
        failures,
        written,
        patch,
    }
}

fn queued_total(ctx: &dyn RefactorContext) -> u64 {
    ctx.edit_counts().values().sum()
}

fn unit_patch(formatter: &PatchFormatter, path: &Utf8Path, old: &str, new: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(old, new);
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ── report assembly ──────────────────────────────────────────────────────

fn report_from_pass(
    pass: &PassOutcome,
    discovery: &DiscoveryReport,
    mode: RunMode,
    tool: ReportToolInfo,
) -> LintfixReport {
    // First descriptor wins when duplicate labels carry different text.
    let mut descriptions: HashMap<&str, &str> = HashMap::new();
    for descriptor in discovery.registry.iter() {
        descriptions
            .entry(descriptor.info.label.as_str())
            .or_insert(descriptor.info.description.as_str());
    }

    let rules: Vec<RuleStatRow> = pass
        .stats
        .iter()
        .map(|(label, changes)| RuleStatRow {
            label: label.to_string(),
            description: descriptions.get(label).copied().unwrap_or("").to_string(),
            changes,
        })
        .collect();

    let changes = pass.stats.changed_total();
    let failure_count = pass.failures.len() as u64;

    let status = if failure_count > 0 {
        ReportStatus::Fail
    } else if changes > 0 || !discovery.warnings.is_empty() {
        ReportStatus::Warn
    } else {
        ReportStatus::Pass
    };

    let mut reasons = Vec::new();
    if changes > 0 {
        reasons.push("requires_refactoring".to_string());
    }
    if !discovery.warnings.is_empty() {
        reasons.push("partial_bundles".to_string());
    }
    if failure_count > 0 {
        reasons.push("unit_failures".to_string());
    }

    let now = Utc::now().to_rfc3339();
    LintfixReport {
        schema: lintfix_types::schema::LINTFIX_REPORT_V1.to_string(),
        tool,
        run: ReportRunInfo {
            started_at: now.clone(),
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: ReportVerdict {
            status,
            counts: ReportCounts {
                rules: pass.stats.len() as u64,
                changes,
                failures: failure_count,
            },
            reasons,
        },
        rules,
        warnings: discovery
            .warnings
            .iter()
            .map(|w| format!("{}: {}", w.artifact, w.message))
            .collect(),
        failures: pass
            .failures
            .iter()
            .map(|f| ReportFailure {
                path: f.path.to_string(),
                kind: f.kind.report_kind().to_string(),
                message: f.kind.to_string(),
            })
            .collect(),
        written: pass
            .written
            .iter()
            .map(|w| ReportWrite {
                path: w.path.to_string(),
                sha256_before: w.sha256_before.clone(),
                sha256_after: w.sha256_after.clone(),
            })
            .collect(),
        artifacts: Some(match mode {
            RunMode::Lint => ReportArtifacts {
                listing: Some("check.md".to_string()),
                patch: Some("patch.diff".to_string()),
            },
            RunMode::Fix => ReportArtifacts {
                listing: Some("apply.md".to_string()),
                patch: None,
            },
        }),
    }
}

// ── artifact writers ─────────────────────────────────────────────────────

/// Write all check artifacts to the output directory.
pub fn write_check_artifacts(
    outcome: &CheckOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let check_md = render_check_md(&outcome.report);
    writer.write_file(&out_dir.join("check.md"), check_md.as_bytes())?;

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;

    Ok(())
}

/// Write all apply artifacts to the output directory.
pub fn write_apply_artifacts(
    outcome: &ApplyOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let apply_md = render_apply_md(&outcome.report);
    writer.write_file(&out_dir.join("apply.md"), apply_md.as_bytes())?;

    Ok(())
}
