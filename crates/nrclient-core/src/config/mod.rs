mod env;
mod types;


pub use types::*;

use types::ConfigFile;

use std::path::Path;
use std::sync::Arc;

use url::Url;

use crate::error::ConfigError;
use crate::logging::Logger;

/// Key of the default field every config-built logger carries.
pub const LOGGER_NAME: &str = "nrclient";

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist. Region and log
    /// level names are matched case-insensitively wherever they come from.
    /// A base URL override is only checked by [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, names
    /// an unknown region or log level, or sets `timeout_secs = 0`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::try_from(toml::from_str::<ConfigFile>(&content)?)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Check the values construction would otherwise reject late.
    ///
    /// The API key is not checked; an empty key only fails on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a base URL override that is not an
    /// absolute http(s) URL, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(raw) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            let url = Url::parse(raw)
                .map_err(|e| ConfigError::Invalid(format!("base_url {raw:?}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "base_url {raw:?} must use http or https"
                )));
            }
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Invalid("timeout must be non-zero".into()));
        }
        Ok(())
    }

    /// Return the logger for this config, building and caching it on first use.
    ///
    /// The logger carries `nrclient=<version>` as a default field and takes
    /// its threshold and format from `log_level` and `log_json`.
    #[must_use]
    pub fn logger(&self) -> Arc<Logger> {
        let logger = self.logger.get_or_init(|| {
            Arc::new(
                Logger::builder()
                    .default_fields([(LOGGER_NAME, env!("CARGO_PKG_VERSION"))])
                    .json(self.log_json)
                    .level(self.log_level)
                    .build(),
            )
        });
        Arc::clone(logger)
    }
}
