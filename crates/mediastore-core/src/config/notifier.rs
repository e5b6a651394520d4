//! Domain-event notifier configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the fire-and-forget domain-event publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Redis URL used for pub/sub event delivery.
    #[serde(default = "default_url")]
    pub url: String,
    /// Channel all mediastore domain events are published on.
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            channel: default_channel(),
        }
    }
}

fn default_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_channel() -> String {
    "mediastore:events".to_string()
}
