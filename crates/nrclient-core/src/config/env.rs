use std::time::Duration;

use super::Config;
use crate::secret::Secret;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("NEW_RELIC_API_KEY") {
            self.api_key = Secret::new(v);
        }
        if let Ok(v) = std::env::var("NEW_RELIC_API_URL") {
            self.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("NEW_RELIC_REGION") {
            match v.parse() {
                Ok(region) => self.region = region,
                Err(e) => tracing::warn!("ignoring NEW_RELIC_REGION: {e}"),
            }
        }
        if let Ok(v) = std::env::var("NEW_RELIC_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!("ignoring invalid NEW_RELIC_TIMEOUT_SECS value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("NEW_RELIC_USER_AGENT") {
            self.user_agent = v;
        }
        if let Ok(v) = std::env::var("NEW_RELIC_LOG_LEVEL") {
            match v.parse() {
                Ok(level) => self.log_level = level,
                Err(e) => tracing::warn!("ignoring NEW_RELIC_LOG_LEVEL: {e}"),
            }
        }
        if let Ok(v) = std::env::var("NEW_RELIC_LOG_JSON") {
            match v.parse::<bool>() {
                Ok(enabled) => self.log_json = enabled,
                Err(_) => tracing::warn!("ignoring invalid NEW_RELIC_LOG_JSON value: {v}"),
            }
        }
    }
}
