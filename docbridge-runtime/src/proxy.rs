//! Image source rewriting.

use serde::{Deserialize, Serialize};

/// Rewrites sources that start with `prefix` to start with `target` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
    pub prefix: String,
    pub target: String,
}

/// Ordered prefix rewrites; the first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyRules {
    rules: Vec<ProxyRule>,
}

impl ProxyRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, prefix: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.push(ProxyRule {
            prefix: prefix.into(),
            target: target.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn matches(&self, src: &str) -> bool {
        self.rules.iter().any(|rule| src.starts_with(&rule.prefix))
    }

    /// Returns `src` rewritten by the first matching rule, or unchanged.
    pub fn rewrite(&self, src: &str) -> String {
        self.rules
            .iter()
            .find_map(|rule| {
                src.strip_prefix(rule.prefix.as_str())
                    .map(|rest| format!("{}{rest}", rule.target))
            })
            .unwrap_or_else(|| src.to_string())
    }
}

impl FromIterator<ProxyRule> for ProxyRules {
    fn from_iter<I: IntoIterator<Item = ProxyRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
