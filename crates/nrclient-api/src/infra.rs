use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::Transport;
use crate::rest::ApiConfig;

/// Base URL of the Infrastructure API when used outside a region-aware config.
pub const DEFAULT_BASE_URL: &str = "https://infra-api.newrelic.com/v2";

/// Client for the Infrastructure monitoring API.
///
/// Takes the same [`ApiConfig`] as [`crate::ApiClient`]; the two handles are
/// built independently and share nothing after construction.
#[derive(Debug, Clone)]
pub struct InfraClient {
    transport: Transport,
}

impl InfraClient {
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            transport: config.into_transport()?,
        })
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.transport.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.transport.debug
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.transport.user_agent
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.transport.timeout
    }

    /// # Errors
    ///
    /// Returns [`crate::ClientError::Status`] on a non-2xx response, or a
    /// transport/JSON error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.transport.get_json(path).await
    }
}
