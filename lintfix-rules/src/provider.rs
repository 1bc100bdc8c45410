use crate::context::RuleFn;
use std::collections::BTreeMap;

/// Named entry-point registrations, keyed by provider then entry name.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, BTreeMap<String, RuleFn>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` as `provider.entry`. Re-registering a name
    /// replaces the previous handler within this table.
    pub fn register(&mut self, provider: &str, entry: &str, handler: RuleFn) {
        self.providers
            .entry(provider.to_string())
            .or_default()
            .insert(entry.to_string(), handler);
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.contains_key(provider)
    }

    pub fn lookup(&self, provider: &str, entry: &str) -> Option<RuleFn> {
        self.providers.get(provider)?.get(entry).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Execution context for discovery: provider tables layered over the
/// caller's own registrations.
///
/// The base layer is the caller's table, so names the host registered
/// resolve identically on both sides of the bundle boundary; earlier
/// layers win when a name collides.
#[derive(Debug, Clone)]
pub struct Resolver {
    layers: Vec<ProviderRegistry>,
}

impl Resolver {
    /// Build a resolver with the caller's own table as its base layer.
    pub fn over(base: ProviderRegistry) -> Self {
        Self { layers: vec![base] }
    }

    /// Add a registration table below every existing layer.
    pub fn push_layer(&mut self, layer: ProviderRegistry) {
        self.layers.push(layer);
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.layers.iter().any(|l| l.has_provider(provider))
    }

    pub fn lookup(&self, provider: &str, entry: &str) -> Option<RuleFn> {
        self.layers.iter().find_map(|l| l.lookup(provider, entry))
    }
}
