//! Stream-style communications provider adapter.
//!
//! Implements `CommsProvider` against a hosted video/chat REST API.
//! Server-side requests authenticate with a JWT signed with the API
//! secret (HS256) plus the API key as a query parameter.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StreamCommsConfig::new(api_key, api_secret)
//!     .with_base_url("https://video.stream-io-api.com");
//!
//! let comms = StreamComms::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::json;

use crate::domain::foundation::CallId;
use crate::ports::{CallMetadata, CommsError, CommsProvider};

/// Call type used for all session video calls.
const CALL_TYPE: &str = "default";

/// Channel type used for all session chat channels.
const CHANNEL_TYPE: &str = "messaging";

/// Configuration for the Stream communications adapter.
#[derive(Debug, Clone)]
pub struct StreamCommsConfig {
    /// API key, sent with every request.
    pub api_key: String,
    /// API secret used to sign server tokens.
    api_secret: Secret<String>,
    /// Base URL for the provider API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl StreamCommsConfig {
    /// Creates a new configuration with the given credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: Secret::new(api_secret.into()),
            base_url: "https://video.stream-io-api.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

/// Server token claims. The provider only requires an assertion that
/// this is a server-side caller.
#[derive(Debug, Serialize)]
struct ServerClaims {
    server: bool,
    iat: i64,
}

/// Reqwest-based `CommsProvider` implementation.
pub struct StreamComms {
    config: StreamCommsConfig,
    client: Client,
}

impl StreamComms {
    /// Creates the adapter with a dedicated HTTP client.
    pub fn new(config: StreamCommsConfig) -> Result<Self, CommsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CommsError::transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Signs a short server JWT for the Authorization header.
    fn server_token(&self) -> Result<String, CommsError> {
        let claims = ServerClaims {
            server: true,
            iat: chrono::Utc::now().timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.api_secret().as_bytes()),
        )
        .map_err(|e| CommsError::Auth(e.to_string()))
    }

    fn call_url(&self, call_id: &CallId) -> String {
        format!(
            "{}/video/call/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            CALL_TYPE,
            call_id
        )
    }

    fn channel_url(&self, call_id: &CallId) -> String {
        format!(
            "{}/channels/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            CHANNEL_TYPE,
            call_id
        )
    }

    fn request(&self, method: Method, url: String) -> Result<RequestBuilder, CommsError> {
        let token = self.server_token()?;
        Ok(self
            .client
            .request(method, url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .header("Authorization", token)
            .header("stream-auth-type", "jwt"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<(), CommsError> {
        let response = request
            .send()
            .await
            .map_err(|e| CommsError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CommsError::Auth(message)),
            _ => Err(CommsError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl CommsProvider for StreamComms {
    async fn create_call(
        &self,
        call_id: &CallId,
        creator_external_id: &str,
        metadata: CallMetadata,
    ) -> Result<(), CommsError> {
        let body = json!({
            "data": {
                "created_by_id": creator_external_id,
                "custom": {
                    "sessionId": metadata.session_id,
                    "problem": metadata.problem,
                    "difficulty": metadata.difficulty,
                },
            },
        });
        let request = self
            .request(Method::POST, self.call_url(call_id))?
            .json(&body);
        self.send(request).await
    }

    async fn create_channel(
        &self,
        call_id: &CallId,
        name: &str,
        creator_external_id: &str,
        members: &[String],
    ) -> Result<(), CommsError> {
        let body = json!({
            "data": {
                "name": name,
                "created_by_id": creator_external_id,
                "members": members,
            },
        });
        let request = self
            .request(Method::POST, self.channel_url(call_id))?
            .json(&body);
        self.send(request).await
    }

    async fn add_channel_member(
        &self,
        call_id: &CallId,
        external_id: &str,
    ) -> Result<(), CommsError> {
        let body = json!({ "add_members": [external_id] });
        let request = self
            .request(Method::POST, self.channel_url(call_id))?
            .json(&body);
        self.send(request).await
    }

    async fn delete_call(&self, call_id: &CallId) -> Result<(), CommsError> {
        let request = self
            .request(Method::DELETE, self.call_url(call_id))?
            .query(&[("hard", "true")]);
        self.send(request).await
    }

    async fn delete_channel(&self, call_id: &CallId) -> Result<(), CommsError> {
        let request = self.request(Method::DELETE, self.channel_url(call_id))?;
        self.send(request).await
    }
}
