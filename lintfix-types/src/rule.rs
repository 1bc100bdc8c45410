use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting metadata a bundle declares for a rule entry point.
///
/// Labels are reporting keys, not identities: two bundles may declare the
/// same label and their change counts merge by addition downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub label: String,

    #[serde(default)]
    pub description: String,
}

impl RuleInfo {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Categories of edits a refactor session tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    RewriteCallTarget,
    ReplaceFragment,
}

impl EditKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EditKind::RewriteCallTarget => "rewrite_call_target",
            EditKind::ReplaceFragment => "replace_fragment",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_kind_display_matches_wire_name() {
        assert_eq!(EditKind::RewriteCallTarget.to_string(), "rewrite_call_target");
        assert_eq!(
            serde_json::to_string(&EditKind::ReplaceFragment).unwrap(),
            "\"replace_fragment\""
        );
    }

    #[test]
    fn rule_info_description_defaults_empty() {
        let info: RuleInfo = serde_json::from_str(r#"{"label": "x"}"#).unwrap();
        assert_eq!(info.label, "x");
        assert!(info.description.is_empty());
    }
}
