use std::sync::{Arc, OnceLock};
use std::time::Duration;

use nrclient_api::http::DEFAULT_USER_AGENT;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::logging::{LogLevel, Logger};
use crate::region::Region;
use crate::secret::Secret;

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

/// On-disk shape of [`Config`]. Enum-valued keys stay text here so they go
/// through the same `FromStr` parsing as env overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    api_key: Option<Secret>,
    base_url: Option<String>,
    region: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    log_level: Option<String>,
    log_json: Option<bool>,
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let mut config = Self::default();
        if let Some(api_key) = file.api_key {
            config.api_key = api_key;
        }
        config.base_url = file.base_url;
        if let Some(region) = file.region {
            config.region = region.parse()?;
        }
        if let Some(secs) = file.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::Invalid("timeout_secs must be non-zero".into()));
            }
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }
        if let Some(level) = file.log_level {
            config.log_level = level.parse()?;
        }
        if let Some(log_json) = file.log_json {
            config.log_json = log_json;
        }
        Ok(config)
    }
}

/// Connection and logging settings for every New Relic API client.
#[derive(Debug)]
pub struct Config {
    pub api_key: Secret,
    /// Overrides the region's base URL when set.
    pub base_url: Option<String>,
    pub region: Region,
    pub timeout: Option<Duration>,
    /// Pre-built HTTP client used by every handle instead of a fresh one.
    pub transport: Option<reqwest::Client>,
    pub user_agent: String,
    pub log_level: LogLevel,
    pub log_json: bool,
    pub(crate) logger: OnceLock<Arc<Logger>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: Secret::default(),
            base_url: None,
            region: Region::default(),
            timeout: None,
            transport: None,
            user_agent: default_user_agent(),
            log_level: LogLevel::default(),
            log_json: false,
            logger: OnceLock::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Secret::new(api_key);
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: reqwest::Client) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    #[must_use]
    pub fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }

    /// Pre-populate the logger cache, replacing any logger already built.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = OnceLock::from(logger);
        self
    }

    /// The base URL override if set and non-empty, otherwise the region's URL.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.region.base_url())
    }
}
