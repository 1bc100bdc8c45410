use camino::Utf8Path;
use lintfix_types::rule::EditKind;
use std::collections::BTreeMap;

/// Mutable per-unit refactor session.
///
/// One session is created per source unit per pass and shared by every
/// rule that runs against the unit, so a later rule observes the edits an
/// earlier rule queued. Queued edits never touch storage; the engine
/// decides whether to persist [`render`](RefactorContext::render).
pub trait RefactorContext {
    /// Queue a rewrite of every call site whose target is `from` to call
    /// `to` instead.
    fn rewrite_call_target(&mut self, from: &str, to: &str);

    /// Queue replacement of every occurrence of a literal fragment.
    fn replace_fragment(&mut self, from: &str, to: &str);

    /// Current queued edit totals keyed by edit kind.
    fn edit_counts(&self) -> BTreeMap<EditKind, u64>;

    /// The unit's text with all queued edits applied.
    fn render(&self) -> String;

    /// Original storage location of the unit.
    fn unit_path(&self) -> &Utf8Path;
}

/// A rule entry point: a module-level function over one refactor context.
///
/// The `fn` pointer type is the contract — an entry is invocable without
/// an instance and takes the context alone, or it does not register.
pub type RuleFn = fn(&mut dyn RefactorContext) -> anyhow::Result<()>;
