use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintfix_types::manifest::RuleManifest;
use thiserror::Error;
use tracing::{debug, warn};

/// Manifest file name at the root of a bundle directory.
pub const BUNDLE_MANIFEST: &str = "rules.toml";

/// Suffix marking a loose manifest file as a bundle in its own right.
pub const LOOSE_MANIFEST_SUFFIX: &str = ".rules.toml";

/// Name suffixes marking documentation- or source-only companion bundles.
const COMPANION_SUFFIXES: &[&str] = &["-docs", "-sources"];

#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub path: Utf8PathBuf,
    pub manifest: Result<RuleManifest, ArtifactLoadError>,
}

#[derive(Debug, Error, Clone)]
pub enum ArtifactLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("manifest parse error: {message}")]
    Parse { message: String },
}

/// Load rule bundles from an ordered list of artifact locations.
///
/// Directories are bundles carrying a root `rules.toml`; files ending in
/// `.rules.toml` are loose single-manifest bundles. Locations whose name
/// stem ends in `-docs` or `-sources` are companion variants and are
/// skipped, as are files of any other shape. A bundle that cannot be read
/// or parsed is kept in the output with its error so callers can report
/// the skip; it never aborts the load.
pub fn load_artifacts(locations: &[Utf8PathBuf]) -> Vec<LoadedArtifact> {
    let mut out = Vec::new();

    for location in locations {
        if !is_candidate(location) {
            debug!(path = %location, "skipping non-bundle artifact");
            continue;
        }

        let manifest = read_manifest(location);
        if let Err(err) = &manifest {
            warn!(path = %location, error = %err, "skipping unloadable rule bundle");
        }

        out.push(LoadedArtifact {
            path: location.clone(),
            manifest,
        });
    }

    out
}

fn is_candidate(path: &Utf8Path) -> bool {
    if path.as_std_path().is_dir() {
        return !is_companion(path.file_name().unwrap_or_default());
    }

    match path.file_name() {
        Some(name) if name.ends_with(LOOSE_MANIFEST_SUFFIX) => {
            let stem = &name[..name.len() - LOOSE_MANIFEST_SUFFIX.len()];
            !is_companion(stem)
        }
        _ => false,
    }
}

fn is_companion(stem: &str) -> bool {
    COMPANION_SUFFIXES.iter().any(|s| stem.ends_with(s))
}

fn read_manifest(location: &Utf8Path) -> Result<RuleManifest, ArtifactLoadError> {
    let manifest_path = if location.as_std_path().is_dir() {
        location.join(BUNDLE_MANIFEST)
    } else {
        location.to_path_buf()
    };

    let contents = fs::read_to_string(&manifest_path).map_err(|e| ArtifactLoadError::Io {
        message: e.to_string(),
    })?;

    toml::from_str(&contents).map_err(|e| ArtifactLoadError::Parse {
        message: e.to_string(),
    })
}
