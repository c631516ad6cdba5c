//! Keyword-extraction API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "https://api.apilayer.com/keyword".to_string()
}

const fn default_timeout_secs() -> u64 {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordApiConfig {
    /// API key sent in the `apikey` header. Empty disables the remote call.
    #[serde(default)]
    pub api_key: String,

    /// Endpoint that accepts `{"text": ...}` and returns `{"keywords": [...]}`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for KeywordApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl KeywordApiConfig {
    /// Check if the remote keyword API can be called.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.url.is_empty()
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
