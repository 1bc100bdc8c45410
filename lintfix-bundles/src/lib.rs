//! Rule-bundle ingestion utilities.
//!
//! lintfix consumes rule bundles produced by other build pipelines. It
//! intentionally does not enforce strict schema validation here; discovery
//! validates declaration shapes. The loader is tolerant so one malformed
//! bundle never blocks discovery of rules in the others.

mod load;

pub use load::{ArtifactLoadError, LoadedArtifact, load_artifacts};
