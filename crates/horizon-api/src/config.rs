//! Client configuration
//!
//! One knob matters: where the API lives. Everything else is carried by
//! the server.

use serde::{Deserialize, Serialize};
use std::env;

/// Connection settings for the Strategic Horizon API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server (env: HORIZON_API_URL).
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("HORIZON_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }

    /// Configuration pointing at an explicit URL.
    pub fn with_url(url: &str) -> Self {
        Self {
            base_url: url.to_string(),
        }
    }
}
