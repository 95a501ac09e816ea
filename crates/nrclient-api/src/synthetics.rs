use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::http::{DEFAULT_USER_AGENT, Transport};

/// Base URL of the Synthetics API v3.
pub const DEFAULT_BASE_URL: &str = "https://synthetics.newrelic.com/synthetics/api/v3";

/// Settings for [`SyntheticsClient`], filled in by a configuration callback.
#[derive(Clone)]
pub struct SyntheticsConfig {
    pub api_key: String,
    pub base_url: String,
    pub debug: bool,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub transport: Option<reqwest::Client>,
}

impl Default for SyntheticsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            debug: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
            transport: None,
        }
    }
}

impl fmt::Debug for SyntheticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

/// Client for the Synthetics monitoring API.
#[derive(Debug, Clone)]
pub struct SyntheticsClient {
    transport: Transport,
}

impl SyntheticsClient {
    /// Start from [`SyntheticsConfig::default`], let `configure` adjust it,
    /// then build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] if `configure` leaves the key
    /// empty, [`ClientError::InvalidBaseUrl`] for a relative base URL, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(&mut SyntheticsConfig),
    {
        let mut config = SyntheticsConfig::default();
        configure(&mut config);

        if config.api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let transport = Transport::new(
            config.api_key,
            config.base_url,
            config.debug,
            config.user_agent,
            config.timeout,
            config.transport,
        )?;
        Ok(Self { transport })
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
    /// Returns [`ClientError::Status`] on a non-2xx response, or a
    /// transport/JSON error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.transport.get_json(path).await
    }
}
