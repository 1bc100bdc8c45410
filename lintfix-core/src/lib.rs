//! Embeddable core library for lintfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a build-tool task or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`UnitSource`](ports::UnitSource) — parse source locations into units
//! - [`SourceUnit`](ports::SourceUnit) — one parsed unit with a session factory
//! - [`WritePort`](ports::WritePort) — write files and create directories
//!
//! The [`adapters`] module provides default text/filesystem-backed
//! implementations.
//!
//! # Entry points
//!
//! - [`run_check`](pipeline::run_check) — lint mode: stats + patch preview
//! - [`run_apply`](pipeline::run_apply) — fix mode: stats + write-back

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the SDK surface so embedders don't need lintfix-rules directly.
pub use lintfix_rules::{ProviderRegistry, Resolver, RuleRegistry, builtin_providers};

// Re-export bundle types so embedders don't need lintfix-bundles directly.
pub use lintfix_bundles::{ArtifactLoadError, LoadedArtifact};
