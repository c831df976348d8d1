use serde::{Deserialize, Serialize};

/// Content backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Whether the backend expects a bearer credential on content requests.
    pub require_auth: bool,
    /// How many upload notifications a slow subscriber may lag behind.
    pub notification_capacity: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            notification_capacity: 16,
        }
    }
}
