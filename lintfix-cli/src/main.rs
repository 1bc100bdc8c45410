mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig};
use lintfix_core::adapters::{FsUnitSource, FsWritePort};
use lintfix_core::pipeline::{
    run_apply, run_check, write_apply_artifacts, write_check_artifacts,
};
use lintfix_core::settings::{ApplySettings, CheckSettings};
use lintfix_core::{Resolver, builtin_providers};
use lintfix_render::{render_apply_text, render_check_text};
use lintfix_rules::discover_rules;
use lintfix_types::report::ReportToolInfo;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lintfix",
    version,
    about = "Rule-driven lint-and-fix tool for batches of source units."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lint all units and report required changes without touching disk.
    Check(CheckArgs),
    /// Run all rules and persist every unit with a positive change count.
    Apply(ApplyArgs),
    /// List the rules discovered from the configured bundles.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Exit with code 2 when any rule reports required changes.
    #[arg(long, default_value_t = false)]
    fail_on_findings: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ApplyArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// Project root (default: current directory). `lintfix.toml` is
    /// discovered here.
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Source roots to scan (overrides config when given).
    #[arg(long = "source-root")]
    source_roots: Vec<Utf8PathBuf>,

    /// Glob patterns applied under each source root.
    #[arg(long = "source-glob")]
    source_globs: Vec<String>,

    /// Rule bundle locations (extends config).
    #[arg(long = "rules")]
    rule_paths: Vec<Utf8PathBuf>,

    /// Output directory for report artifacts
    /// (default: <project_root>/artifacts/lintfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Apply(args) => cmd_apply(args),
        Command::ListRules(args) => cmd_list_rules(args),
    }
}

fn tool_info() -> ReportToolInfo {
    ReportToolInfo {
        name: "lintfix".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: None,
    }
}

fn merge_config(common: &CommonArgs, fail_on_findings: bool) -> anyhow::Result<MergedConfig> {
    let file_config =
        config::load_or_default(&common.project_root).context("load lintfix.toml config")?;
    Ok(ConfigMerger::new(file_config).merge_args(
        &common.project_root,
        &common.source_roots,
        &common.source_globs,
        &common.rule_paths,
        common.out_dir.as_deref(),
        fail_on_findings,
    ))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let merged = merge_config(&args.common, args.fail_on_findings)?;

    let settings = CheckSettings {
        source_roots: merged.source_roots.clone(),
        source_globs: merged.source_globs.clone(),
        rule_paths: merged.rule_paths.clone(),
        out_dir: merged.out_dir.clone(),
    };
    let units = FsUnitSource::new(settings.source_roots.clone(), settings.source_globs.clone());
    let resolver = Resolver::over(builtin_providers());

    let outcome = run_check(&settings, &units, &resolver, tool_info())?;
    write_check_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .with_context(|| format!("write artifacts to {}", settings.out_dir))?;

    match args.format {
        OutputFormat::Text => {
            let listing = render_check_text(&outcome.report);
            if listing.is_empty() {
                info!("no changes required");
            } else {
                print!("{listing}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        }
    }

    if !outcome.failures.is_empty() {
        return Ok(ExitCode::from(1));
    }
    if merged.fail_on_findings && outcome.stats.changed_total() > 0 {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<ExitCode> {
    let merged = merge_config(&args.common, false)?;

    let settings = ApplySettings {
        source_roots: merged.source_roots.clone(),
        source_globs: merged.source_globs.clone(),
        rule_paths: merged.rule_paths.clone(),
        out_dir: merged.out_dir.clone(),
    };
    let units = FsUnitSource::new(settings.source_roots.clone(), settings.source_globs.clone());
    let resolver = Resolver::over(builtin_providers());

    let outcome = run_apply(&settings, &units, &resolver, &FsWritePort, tool_info())?;
    write_apply_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .with_context(|| format!("write artifacts to {}", settings.out_dir))?;

    match args.format {
        OutputFormat::Text => {
            let listing = render_apply_text(&outcome.report);
            if listing.is_empty() {
                info!("no changes required");
            } else {
                print!("{listing}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        }
    }

    if !outcome.failures.is_empty() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<ExitCode> {
    let merged = merge_config(&args.common, false)?;

    let artifacts = lintfix_bundles::load_artifacts(&merged.rule_paths);
    let resolver = Resolver::over(builtin_providers());
    let discovery = discover_rules(&artifacts, &resolver);

    match args.format {
        OutputFormat::Text => {
            for descriptor in discovery.registry.iter() {
                if descriptor.info.description.is_empty() {
                    println!("{}", descriptor.info.label);
                } else {
                    println!("{} — {}", descriptor.info.label, descriptor.info.description);
                }
            }
            for warning in &discovery.warnings {
                eprintln!("warning: {}: {}", warning.artifact, warning.message);
            }
        }
        OutputFormat::Json => {
            let infos: Vec<_> = discovery.registry.iter().map(|d| &d.info).collect();
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
