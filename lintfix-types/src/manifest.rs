//! Wire format for rule-bundle manifests (`lintfix.rules.v1`).
//!
//! A bundle declares its rule entry points in a TOML manifest. The loader
//! is tolerant: unknown fields are ignored and most fields default, so a
//! bundle built against a newer engine still loads. Shape validation of
//! the declarations themselves happens at discovery time, not here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RuleManifest {
    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleDecl>,
}

fn default_schema() -> String {
    crate::schema::LINTFIX_RULES_V1.to_string()
}

/// One declared rule entry point: a (provider, entry) pair to resolve in
/// the execution context, plus reporting metadata and the declared shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleDecl {
    /// Name of the registered provider declaring the entry point.
    pub provider: String,

    /// Member name on the provider.
    pub entry: String,

    /// Reporting label. Not required unique across bundles.
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Declared receiver shape. Only `static` entries are invocable.
    #[serde(default)]
    pub kind: EntryKind,

    /// Declared parameter list. Must be exactly one refactor-context
    /// parameter for the entry to be usable as a rule.
    #[serde(default = "default_params")]
    pub params: Vec<ParamDecl>,
}

fn default_params() -> Vec<ParamDecl> {
    vec![ParamDecl::Context]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Static,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ParamDecl {
    Context,
    Other(String),
}

impl From<String> for ParamDecl {
    fn from(s: String) -> Self {
        if s == "context" {
            ParamDecl::Context
        } else {
            ParamDecl::Other(s)
        }
    }
}

impl From<ParamDecl> for String {
    fn from(p: ParamDecl) -> String {
        match p {
            ParamDecl::Context => "context".to_string(),
            ParamDecl::Other(s) => s,
        }
    }
}
