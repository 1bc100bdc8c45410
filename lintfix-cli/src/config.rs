//! Configuration file loading for lintfix.
//!
//! Discovers and loads `lintfix.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "lintfix.toml";

/// Top-level configuration from lintfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintfixConfig {
    /// Source discovery settings.
    pub sources: SourcesConfig,

    /// Rule bundle settings.
    pub rules: RulesConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Sources section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Roots to scan for source units.
    pub roots: Vec<Utf8PathBuf>,

    /// Glob patterns applied under each root.
    pub globs: Vec<String>,
}

/// Rules section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Ordered rule-bundle locations.
    pub paths: Vec<Utf8PathBuf>,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for report artifacts.
    pub dir: Option<Utf8PathBuf>,

    /// Exit non-zero from `check` when changes are required.
    pub fail_on_findings: bool,
}

/// Discover the lintfix.toml config file.
///
/// Returns `None` if no config file is found in the project root.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a lintfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<LintfixConfig> {
    let config: LintfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<LintfixConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(LintfixConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub source_roots: Vec<Utf8PathBuf>,
    pub source_globs: Vec<String>,
    pub rule_paths: Vec<Utf8PathBuf>,
    pub out_dir: Utf8PathBuf,
    pub fail_on_findings: bool,
}

/// Builder for merging config file with CLI arguments.
///
/// Source roots and globs are positional inputs: a non-empty CLI list
/// replaces the config list. Rule paths accumulate (config first, then
/// CLI, deduplicated). Boolean flags turn on when set on either side.
pub struct ConfigMerger {
    config: LintfixConfig,
}

impl ConfigMerger {
    pub fn new(config: LintfixConfig) -> Self {
        Self { config }
    }

    pub fn merge_args(
        self,
        project_root: &Utf8Path,
        cli_roots: &[Utf8PathBuf],
        cli_globs: &[String],
        cli_rules: &[Utf8PathBuf],
        cli_out_dir: Option<&Utf8Path>,
        cli_fail_on_findings: bool,
    ) -> MergedConfig {
        let mut source_roots = if cli_roots.is_empty() {
            self.config.sources.roots.clone()
        } else {
            cli_roots.to_vec()
        };
        if source_roots.is_empty() {
            source_roots.push(project_root.join("src"));
        }

        let mut source_globs = if cli_globs.is_empty() {
            self.config.sources.globs.clone()
        } else {
            cli_globs.to_vec()
        };
        if source_globs.is_empty() {
            source_globs.push("**/*.java".to_string());
        }

        let mut rule_paths = self.config.rules.paths.clone();
        for path in cli_rules {
            if !rule_paths.contains(path) {
                rule_paths.push(path.clone());
            }
        }

        let out_dir = cli_out_dir
            .map(Utf8Path::to_path_buf)
            .or_else(|| self.config.output.dir.clone())
            .unwrap_or_else(|| project_root.join("artifacts/lintfix"));

        MergedConfig {
            source_roots,
            source_globs,
            rule_paths,
            out_dir,
            fail_on_findings: cli_fail_on_findings || self.config.output.fail_on_findings,
        }
    }
}
