use crate::context::RuleFn;
use lintfix_types::rule::RuleInfo;

/// One discovered, validated rule: reporting metadata plus the invocable
/// handle bound at discovery time.
#[derive(Debug, Clone)]
pub struct RuleDescriptor {
    pub info: RuleInfo,
    pub handler: RuleFn,
}

/// Ordered, read-only collection of discovered rules.
///
/// Entries keep discovery order and are never removed or reordered.
/// Duplicate labels are permitted and are not merged here; labels are
/// reporting keys and merging is the stats aggregator's concern.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    descriptors: Vec<RuleDescriptor>,
}

impl RuleRegistry {
    pub fn from_descriptors(descriptors: Vec<RuleDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
