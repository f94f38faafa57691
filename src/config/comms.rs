//! Communications provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Communications provider configuration (Stream)
#[derive(Debug, Clone, Deserialize)]
pub struct CommsConfig {
    /// Stream API key
    pub api_key: String,

    /// Stream API secret, used to sign server tokens
    pub api_secret: Secret<String>,

    /// API base URL override
    pub base_url: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl CommsConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate communications configuration
    ///
    /// In production, a base URL override must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("COMMS_API_KEY"));
        }
        if self.api_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("COMMS_API_SECRET"));
        }
        if *environment == Environment::Production {
            if let Some(url) = &self.base_url {
                if !url.starts_with("https://") {
                    return Err(ValidationError::CommsUrlMustBeHttps);
                }
            }
        }
        Ok(())
    }
}

impl Default for CommsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: Secret::new(String::new()),
            base_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
