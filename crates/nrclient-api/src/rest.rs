use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::{DEFAULT_USER_AGENT, Transport};

/// Base URL of the US production REST API v2.
pub const DEFAULT_BASE_URL: &str = "https://api.newrelic.com/v2";

/// Connection settings shared by the REST and Infrastructure clients.
#[derive(Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Log every request and response status at debug level.
    pub debug: bool,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    /// Pre-built client used instead of constructing one.
    pub transport: Option<reqwest::Client>,
}

impl Default for ApiConfig {
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

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

impl ApiConfig {
    pub(crate) fn into_transport(self) -> Result<Transport> {
        Transport::new(
            self.api_key,
            self.base_url,
            self.debug,
            self.user_agent,
            self.timeout,
            self.transport,
        )
    }
}

/// Client for the general-purpose REST API v2.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Transport,
}

impl ApiClient {
    /// Build a client from `config`. The API key is not checked here; an
    /// invalid key surfaces on the first request.
    ///
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

    /// `GET {base_url}/{path}` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Status`] on a non-2xx response, or a
    /// transport/JSON error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.transport.get_json(path).await
    }
}
