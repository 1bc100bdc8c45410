//! Port traits abstracting all I/O away from the pipelines.

use camino::Utf8Path;
use lintfix_rules::RefactorContext;

/// One parsed source unit.
pub trait SourceUnit {
    /// Original storage location of the unit.
    fn path(&self) -> &Utf8Path;

    /// Open a fresh refactor session over this unit.
    fn refactor(&self) -> Box<dyn RefactorContext>;
}

/// Parser collaborator: turns configured source locations into units.
pub trait UnitSource {
    fn parse_units(&self) -> anyhow::Result<Vec<Box<dyn SourceUnit>>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
