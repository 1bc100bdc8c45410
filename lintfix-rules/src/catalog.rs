//! Builtin provider table linked into the engine.
//!
//! Hosts embed their own registrations as the resolver's base layer and
//! push this catalog underneath, so bundles can reference the builtin
//! migrations without shipping code.

use crate::context::RefactorContext;
use crate::provider::ProviderRegistry;

pub fn builtin_providers() -> ProviderRegistry {
    let mut reg = ProviderRegistry::new();
    reg.register("deprecations", "empty_iterator", empty_iterator);
    reg.register("deprecations", "charset_names", charset_names);
    reg.register("deprecations", "first_non_null", first_non_null);
    reg
}

/// Guava's `Iterators.emptyIterator` was deprecated in favor of the JDK
/// equivalent.
fn empty_iterator(ctx: &mut dyn RefactorContext) -> anyhow::Result<()> {
    ctx.rewrite_call_target("Iterators.emptyIterator", "Collections.emptyIterator");
    Ok(())
}

fn charset_names(ctx: &mut dyn RefactorContext) -> anyhow::Result<()> {
    ctx.replace_fragment("Charsets.UTF_8", "StandardCharsets.UTF_8");
    ctx.replace_fragment("Charsets.US_ASCII", "StandardCharsets.US_ASCII");
    Ok(())
}

fn first_non_null(ctx: &mut dyn RefactorContext) -> anyhow::Result<()> {
    ctx.rewrite_call_target("Objects.firstNonNull", "MoreObjects.firstNonNull");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};
    use lintfix_types::rule::EditKind;
    use std::collections::BTreeMap;

    /// Records queued edits without any text model behind them.
    struct RecordingContext {
        path: Utf8PathBuf,
        edits: Vec<(EditKind, String, String)>,
    }

    impl RecordingContext {
        fn new() -> Self {
            Self {
                path: Utf8PathBuf::from("A.java"),
                edits: Vec::new(),
            }
        }
    }

    impl RefactorContext for RecordingContext {
        fn rewrite_call_target(&mut self, from: &str, to: &str) {
            self.edits
                .push((EditKind::RewriteCallTarget, from.to_string(), to.to_string()));
        }

        fn replace_fragment(&mut self, from: &str, to: &str) {
            self.edits
                .push((EditKind::ReplaceFragment, from.to_string(), to.to_string()));
        }

        fn edit_counts(&self) -> BTreeMap<EditKind, u64> {
            let mut counts = BTreeMap::new();
            for (kind, _, _) in &self.edits {
                *counts.entry(*kind).or_insert(0) += 1;
            }
            counts
        }

        fn render(&self) -> String {
            String::new()
        }

        fn unit_path(&self) -> &Utf8Path {
            &self.path
        }
    }

    #[test]
    fn catalog_entries_resolve() {
        let reg = builtin_providers();
        assert!(reg.lookup("deprecations", "empty_iterator").is_some());
        assert!(reg.lookup("deprecations", "charset_names").is_some());
        assert!(reg.lookup("deprecations", "first_non_null").is_some());
        assert!(reg.lookup("deprecations", "nope").is_none());
    }

    #[test]
    fn empty_iterator_queues_one_call_rewrite() {
        let mut ctx = RecordingContext::new();
        empty_iterator(&mut ctx).unwrap();

        assert_eq!(ctx.edits.len(), 1);
        assert_eq!(ctx.edits[0].0, EditKind::RewriteCallTarget);
        assert_eq!(ctx.edits[0].2, "Collections.emptyIterator");
    }

    #[test]
    fn charset_names_queues_fragment_replacements() {
        let mut ctx = RecordingContext::new();
        charset_names(&mut ctx).unwrap();

        assert_eq!(ctx.edit_counts().get(&EditKind::ReplaceFragment), Some(&2));
    }
}
