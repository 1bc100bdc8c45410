//! Manifest-driven rule discovery.
//!
//! Discovery scans loaded bundle manifests only; a `(provider, entry)`
//! pair is resolved through the execution context once it appears as a
//! candidate. Every per-candidate failure warns and skips — one bad
//! declaration or unloadable bundle never aborts the scan.

use crate::provider::Resolver;
use crate::registry::{RuleDescriptor, RuleRegistry};
use camino::Utf8PathBuf;
use lintfix_bundles::LoadedArtifact;
use lintfix_types::manifest::{EntryKind, ParamDecl, RuleDecl};
use lintfix_types::rule::RuleInfo;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct DiscoveryReport {
    pub registry: RuleRegistry,
    pub warnings: Vec<DiscoveryWarning>,
}

#[derive(Debug, Clone)]
pub struct DiscoveryWarning {
    pub artifact: Utf8PathBuf,
    pub message: String,
}

/// Scan loaded bundles in supplied order and build the rule registry.
///
/// Descriptors are appended in artifact order, then declaration order
/// within each manifest. Duplicate labels across bundles are kept as-is.
pub fn discover_rules(artifacts: &[LoadedArtifact], resolver: &Resolver) -> DiscoveryReport {
    let mut descriptors = Vec::new();
    let mut warnings = Vec::new();

    for artifact in artifacts {
        let manifest = match &artifact.manifest {
            Ok(m) => m,
            Err(err) => {
                push_warning(
                    &mut warnings,
                    &artifact.path,
                    format!("bundle skipped: {err}"),
                );
                continue;
            }
        };

        for decl in &manifest.rules {
            match resolve_candidate(decl, resolver) {
                Ok(handler) => {
                    debug!(
                        provider = decl.provider.as_str(),
                        entry = decl.entry.as_str(),
                        label = decl.label.as_str(),
                        "discovered rule"
                    );
                    descriptors.push(RuleDescriptor {
                        info: RuleInfo::new(&decl.label, &decl.description),
                        handler,
                    });
                }
                Err(message) => push_warning(&mut warnings, &artifact.path, message),
            }
        }
    }

    DiscoveryReport {
        registry: RuleRegistry::from_descriptors(descriptors),
        warnings,
    }
}

fn resolve_candidate(
    decl: &RuleDecl,
    resolver: &Resolver,
) -> Result<crate::context::RuleFn, String> {
    if !resolver.has_provider(&decl.provider) {
        return Err(format!(
            "{}.{} skipped: no registered provider named `{}`.",
            decl.provider, decl.entry, decl.provider
        ));
    }

    let Some(handler) = resolver.lookup(&decl.provider, &decl.entry) else {
        return Err(format!(
            "{}.{} skipped: provider `{}` has no entry point named `{}`.",
            decl.provider, decl.entry, decl.provider, decl.entry
        ));
    };

    if !is_static_context(decl) {
        return Err(format!(
            "{}.{} will be ignored: must be a static entry point with a single \
             refactor-context argument.",
            decl.provider, decl.entry
        ));
    }

    Ok(handler)
}

fn is_static_context(decl: &RuleDecl) -> bool {
    decl.kind == EntryKind::Static && decl.params == [ParamDecl::Context]
}

fn push_warning(warnings: &mut Vec<DiscoveryWarning>, artifact: &Utf8PathBuf, message: String) {
    warn!(artifact = %artifact, "{message}");
    warnings.push(DiscoveryWarning {
        artifact: artifact.clone(),
        message,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RefactorContext;
    use crate::provider::ProviderRegistry;
    use lintfix_bundles::ArtifactLoadError;
    use lintfix_types::manifest::RuleManifest;
    use pretty_assertions::assert_eq;

    fn noop(_ctx: &mut dyn RefactorContext) -> anyhow::Result<()> {
        Ok(())
    }

    fn resolver() -> Resolver {
        let mut reg = ProviderRegistry::new();
        reg.register("deprecations", "empty_iterator", noop);
        reg.register("deprecations", "charset_names", noop);
        Resolver::over(reg)
    }

    fn artifact(path: &str, manifest_toml: &str) -> LoadedArtifact {
        LoadedArtifact {
            path: Utf8PathBuf::from(path),
            manifest: Ok(toml::from_str::<RuleManifest>(manifest_toml).expect("manifest")),
        }
    }

    fn failed_artifact(path: &str) -> LoadedArtifact {
        LoadedArtifact {
            path: Utf8PathBuf::from(path),
            manifest: Err(ArtifactLoadError::Io {
                message: "unreadable".to_string(),
            }),
        }
    }

    #[test]
    fn discovers_valid_declarations_in_order() {
        let artifacts = vec![
            artifact(
                "bundles/b",
                r#"
                    [[rule]]
                    provider = "deprecations"
                    entry = "charset_names"
                    label = "charsets"
                "#,
            ),
            artifact(
                "bundles/a",
                r#"
                    [[rule]]
                    provider = "deprecations"
                    entry = "empty_iterator"
                    label = "iterators"
                    description = "fix Guava deprecations"
                "#,
            ),
        ];

        let report = discover_rules(&artifacts, &resolver());
        assert!(report.warnings.is_empty());
        let labels: Vec<&str> = report
            .registry
            .iter()
            .map(|d| d.info.label.as_str())
            .collect();
        assert_eq!(labels, vec!["charsets", "iterators"]);
    }

    #[test]
    fn method_entry_is_ignored_with_warning() {
        let artifacts = vec![artifact(
            "bundles/a",
            r#"
                [[rule]]
                provider = "deprecations"
                entry = "empty_iterator"
                label = "iterators"
                kind = "method"
            "#,
        )];

        let report = discover_rules(&artifacts, &resolver());
        assert!(report.registry.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].message,
            "deprecations.empty_iterator will be ignored: must be a static entry point \
             with a single refactor-context argument."
        );
    }

    #[test]
    fn wrong_arity_is_ignored_with_warning() {
        let artifacts = vec![artifact(
            "bundles/a",
            r#"
                [[rule]]
                provider = "deprecations"
                entry = "empty_iterator"
                label = "iterators"
                params = ["context", "extra"]
            "#,
        )];

        let report = discover_rules(&artifacts, &resolver());
        assert!(report.registry.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("will be ignored"));
    }

    #[test]
    fn non_context_single_param_is_ignored() {
        let artifacts = vec![artifact(
            "bundles/a",
            r#"
                [[rule]]
                provider = "deprecations"
                entry = "empty_iterator"
                label = "iterators"
                params = ["options"]
            "#,
        )];

        let report = discover_rules(&artifacts, &resolver());
        assert!(report.registry.is_empty());
        assert!(report.warnings[0].message.contains("will be ignored"));
    }

    #[test]
    fn unresolved_names_skip_without_aborting() {
        let artifacts = vec![artifact(
            "bundles/a",
            r#"
                [[rule]]
                provider = "nope"
                entry = "missing"
                label = "a"

                [[rule]]
                provider = "deprecations"
                entry = "missing"
                label = "b"

                [[rule]]
                provider = "deprecations"
                entry = "empty_iterator"
                label = "c"
            "#,
        )];

        let report = discover_rules(&artifacts, &resolver());
        assert_eq!(report.registry.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].message.contains("no registered provider"));
        assert!(report.warnings[1].message.contains("has no entry point"));
    }

    #[test]
    fn unloadable_bundle_does_not_block_the_rest() {
        let artifacts = vec![
            failed_artifact("bundles/broken"),
            artifact(
                "bundles/ok",
                r#"
                    [[rule]]
                    provider = "deprecations"
                    entry = "empty_iterator"
                    label = "iterators"
                "#,
            ),
        ];

        let report = discover_rules(&artifacts, &resolver());
        assert_eq!(report.registry.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("bundle skipped"));
        assert_eq!(report.warnings[0].artifact, Utf8PathBuf::from("bundles/broken"));
    }

    #[test]
    fn duplicate_labels_are_kept() {
        let manifest = r#"
            [[rule]]
            provider = "deprecations"
            entry = "empty_iterator"
            label = "guava"

            [[rule]]
            provider = "deprecations"
            entry = "charset_names"
            label = "guava"
        "#;

        let report = discover_rules(&[artifact("bundles/a", manifest)], &resolver());
        assert_eq!(report.registry.len(), 2);
    }

    #[test]
    fn host_layer_registrations_resolve() {
        let mut host = ProviderRegistry::new();
        host.register("host", "custom", noop);
        let mut resolver = Resolver::over(host);
        resolver.push_layer(ProviderRegistry::new());

        let artifacts = vec![artifact(
            "bundles/a",
            r#"
                [[rule]]
                provider = "host"
                entry = "custom"
                label = "host-rule"
            "#,
        )];

        let report = discover_rules(&artifacts, &resolver);
        assert_eq!(report.registry.len(), 1);
        assert!(report.warnings.is_empty());
    }
}
