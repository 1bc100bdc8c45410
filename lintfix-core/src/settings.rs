//! Clap-free settings for the check and apply pipelines.

use camino::Utf8PathBuf;

/// Execution mode of a rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report-only: no unit is persisted regardless of counts.
    Lint,
    /// Persist each unit whose accumulated change count is positive.
    Fix,
}

/// Settings for the check pipeline.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Roots to scan for source units.
    pub source_roots: Vec<Utf8PathBuf>,

    /// Glob patterns applied under each root.
    pub source_globs: Vec<String>,

    /// Ordered rule-bundle locations.
    pub rule_paths: Vec<Utf8PathBuf>,

    /// Output directory for report artifacts.
    pub out_dir: Utf8PathBuf,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            source_roots: vec![Utf8PathBuf::from("src")],
            source_globs: vec!["**/*.java".to_string()],
            rule_paths: Vec::new(),
            out_dir: Utf8PathBuf::from("artifacts/lintfix"),
        }
    }
}

/// Settings for the apply pipeline.
#[derive(Debug, Clone)]
pub struct ApplySettings {
    pub source_roots: Vec<Utf8PathBuf>,
    pub source_globs: Vec<String>,
    pub rule_paths: Vec<Utf8PathBuf>,
    pub out_dir: Utf8PathBuf,
}

impl Default for ApplySettings {
    fn default() -> Self {
        let check = CheckSettings::default();
        Self {
            source_roots: check.source_roots,
            source_globs: check.source_globs,
            rule_paths: check.rule_paths,
            out_dir: check.out_dir,
        }
    }
}
