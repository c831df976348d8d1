use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An engine plugin to enable, with its options.
///
/// The engine interprets both fields; the adapter only keeps their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    #[serde(default)]
    pub options: Value,
}

impl PluginDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}
