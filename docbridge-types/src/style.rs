//! Paragraph style records served by the style service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named paragraph style.
///
/// Style names are unique ignoring case. The formatting attributes are kept
/// as an opaque object because only the engine interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub style_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
}

impl StyleRecord {
    /// Creates a style with only a name.
    #[must_use]
    pub fn named(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            mode: None,
            description: None,
            styles: None,
        }
    }

    /// Returns true when `name` refers to this style, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.style_name.eq_ignore_ascii_case(name)
    }
}
