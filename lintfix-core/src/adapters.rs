//! Default text/filesystem-backed port implementations.
//!
//! The text session is the reference refactor collaborator: edits apply
//! eagerly to a working buffer, so a later rule observes what an earlier
//! rule changed and `render` is always the current state of the unit.

use crate::ports::{SourceUnit, UnitSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use lintfix_rules::RefactorContext;
use lintfix_types::rule::EditKind;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One plain-text source unit.
#[derive(Debug, Clone)]
pub struct TextUnit {
    path: Utf8PathBuf,
    text: String,
}

impl TextUnit {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

impl SourceUnit for TextUnit {
    fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn refactor(&self) -> Box<dyn RefactorContext> {
        Box::new(TextRefactorContext {
            path: self.path.clone(),
            text: self.text.clone(),
            counts: BTreeMap::new(),
        })
    }
}

/// Text-buffer refactor session.
#[derive(Debug)]
pub struct TextRefactorContext {
    path: Utf8PathBuf,
    text: String,
    counts: BTreeMap<EditKind, u64>,
}

impl TextRefactorContext {
    fn apply(&mut self, kind: EditKind, needle: &str, replacement: &str) {
        if needle.is_empty() || needle == replacement {
            return;
        }

        let hits = self.text.matches(needle).count() as u64;
        if hits == 0 {
            return;
        }

        self.text = self.text.replace(needle, replacement);
        *self.counts.entry(kind).or_insert(0) += hits;
    }
}

impl RefactorContext for TextRefactorContext {
    fn rewrite_call_target(&mut self, from: &str, to: &str) {
        // Call sites only: the target followed by its argument list.
        self.apply(
            EditKind::RewriteCallTarget,
            &format!("{from}("),
            &format!("{to}("),
        );
    }

    fn replace_fragment(&mut self, from: &str, to: &str) {
        self.apply(EditKind::ReplaceFragment, from, to);
    }

    fn edit_counts(&self) -> BTreeMap<EditKind, u64> {
        self.counts.clone()
    }

    fn render(&self) -> String {
        self.text.clone()
    }

    fn unit_path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Parses source files found under the configured roots into text units.
#[derive(Debug, Clone)]
pub struct FsUnitSource {
    roots: Vec<Utf8PathBuf>,
    globs: Vec<String>,
}

impl FsUnitSource {
    pub fn new(roots: Vec<Utf8PathBuf>, globs: Vec<String>) -> Self {
        Self { roots, globs }
    }
}

impl UnitSource for FsUnitSource {
    fn parse_units(&self) -> anyhow::Result<Vec<Box<dyn SourceUnit>>> {
        // Deterministic order matters.
        let mut paths = BTreeSet::new();
        for root in &self.roots {
            for pattern in &self.globs {
                let full = root.join(pattern);
                debug!(pattern = %full, "scanning for source units");
                for entry in glob(full.as_str()).with_context(|| format!("glob {}", full))? {
                    let path = entry
                        .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
                        .to_string_lossy()
                        .to_string();
                    let utf8_path = Utf8PathBuf::from(path);
                    if utf8_path.as_std_path().is_file() {
                        paths.insert(utf8_path);
                    }
                }
            }
        }

        let mut units: Vec<Box<dyn SourceUnit>> = Vec::with_capacity(paths.len());
        for path in paths {
            match fs::read_to_string(&path) {
                Ok(text) => units.push(Box::new(TextUnit::new(path, text))),
                Err(e) => debug!(path = %path, error = %e, "skipping unreadable source file"),
            }
        }
        Ok(units)
    }
}

/// In-memory unit source for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitSource {
    units: Vec<TextUnit>,
}

impl InMemoryUnitSource {
    pub fn new(units: Vec<TextUnit>) -> Self {
        Self { units }
    }
}

impl UnitSource for InMemoryUnitSource {
    fn parse_units(&self) -> anyhow::Result<Vec<Box<dyn SourceUnit>>> {
        Ok(self
            .units
            .iter()
            .map(|u| Box::new(u.clone()) as Box<dyn SourceUnit>)
            .collect())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
