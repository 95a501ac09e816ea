//! Client construction from a [`Config`].

use nrclient_api::{ApiClient, ApiConfig, InfraClient, SyntheticsClient};

use crate::config::Config;
use crate::error::ConfigError;

/// Whether the ambient subscriber would record DEBUG events here.
fn ambient_debug() -> bool {
    tracing::enabled!(tracing::Level::DEBUG)
}

/// One handle per New Relic API surface.
#[derive(Debug, Clone)]
pub struct ProviderClients {
    pub client: ApiClient,
    pub infra: InfraClient,
    pub synthetics: SyntheticsClient,
}

impl Config {
    fn api_config(&self) -> ApiConfig {
        ApiConfig {
            api_key: self.api_key.expose().to_owned(),
            base_url: self.resolved_base_url().to_owned(),
            debug: ambient_debug(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            transport: self.transport.clone(),
        }
    }

    /// Build a client for the general REST API.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// cannot be built. The API key is not checked.
    pub fn client(&self) -> Result<ApiClient, ConfigError> {
        let client = ApiClient::new(self.api_config())?;
        tracing::info!(region = %self.region, "New Relic client configured");
        Ok(client)
    }

    /// Build a client for the Infrastructure API.
    ///
    /// # Errors
    ///
    /// Same as [`Config::client`].
    pub fn client_infra(&self) -> Result<InfraClient, ConfigError> {
        let client = InfraClient::new(self.api_config())?;
        tracing::info!(region = %self.region, "New Relic Infra client configured");
        Ok(client)
    }

    /// Build a client for the Synthetics API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty, the base URL is not absolute,
    /// or the HTTP client cannot be built.
    pub fn client_synthetics(&self) -> Result<SyntheticsClient, ConfigError> {
        let client = SyntheticsClient::new(|c| {
            c.api_key = self.api_key.expose().to_owned();
            c.base_url = self.resolved_base_url().to_owned();
            c.debug = ambient_debug();
            c.user_agent.clone_from(&self.user_agent);
            c.timeout = self.timeout;
            c.transport.clone_from(&self.transport);
        })?;
        tracing::info!(region = %self.region, "New Relic Synthetics client configured");
        Ok(client)
    }

    /// Build all three clients.
    ///
    /// # Errors
    ///
    /// Returns the first construction error.
    pub fn clients(&self) -> Result<ProviderClients, ConfigError> {
        Ok(ProviderClients {
            client: self.client()?,
            infra: self.client_infra()?,
            synthetics: self.client_synthetics()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nrclient_api::ClientError;
    use nrclient_api::http::DEFAULT_USER_AGENT;

    use super::*;
    use crate::region::Region;

    fn quiet_subscriber(level: tracing::Level) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::sink)
            .finish()
    }

    #[test]
    fn every_factory_propagates_api_key() {
        let config = Config::default().with_api_key("NRAK-test");
        assert_eq!(config.client().unwrap().api_key(), "NRAK-test");
        assert_eq!(config.client_infra().unwrap().api_key(), "NRAK-test");
        assert_eq!(config.client_synthetics().unwrap().api_key(), "NRAK-test");
    }

    #[test]
    fn eu_region_resolves_for_every_factory() {
        let config = Config::default().with_api_key("k").with_region(Region::Eu);
        let eu = "https://api.eu.newrelic.com/v2";
        assert_eq!(config.client().unwrap().base_url(), eu);
        assert_eq!(config.client_infra().unwrap().base_url(), eu);
        assert_eq!(config.client_synthetics().unwrap().base_url(), eu);
    }

    #[test]
    fn base_url_override_wins_over_region() {
        let config = Config::default()
            .with_api_key("k")
            .with_region(Region::Staging)
            .with_base_url("https://proxy.internal/v2");
        assert_eq!(config.client().unwrap().base_url(), "https://proxy.internal/v2");
    }

    #[test]
    fn user_agent_and_timeout_are_copied() {
        let config = Config::default()
            .with_api_key("k")
            .with_user_agent("terraform-provider/2.0")
            .with_timeout(Duration::from_secs(15));
        let client = config.client_infra().unwrap();
        assert_eq!(client.user_agent(), "terraform-provider/2.0");
        assert_eq!(client.timeout(), Some(Duration::from_secs(15)));

        let synthetics = config.client_synthetics().unwrap();
        assert_eq!(synthetics.user_agent(), "terraform-provider/2.0");
        assert_eq!(synthetics.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn default_user_agent_is_used() {
        let config = Config::default().with_api_key("k");
        assert_eq!(config.client().unwrap().user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn rest_factories_accept_empty_key() {
        let config = Config::default();
        assert!(config.client().is_ok());
        assert!(config.client_infra().is_ok());
    }

    #[test]
    fn synthetics_factory_propagates_missing_key() {
        let err = Config::default().client_synthetics().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Client(ClientError::MissingApiKey)
        ));
    }

    #[test]
    fn invalid_base_url_override_is_reported() {
        let err = Config::default()
            .with_api_key("k")
            .with_base_url("newrelic")
            .client()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Client(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn debug_follows_ambient_debug_level() {
        let config = Config::default().with_api_key("k");
        tracing::subscriber::with_default(quiet_subscriber(tracing::Level::DEBUG), || {
            assert!(config.client().unwrap().debug());
            assert!(config.client_infra().unwrap().debug());
            assert!(config.client_synthetics().unwrap().debug());
        });
    }

    #[test]
    fn debug_off_at_ambient_info_level() {
        let config = Config::default().with_api_key("k");
        tracing::subscriber::with_default(quiet_subscriber(tracing::Level::INFO), || {
            assert!(!config.client().unwrap().debug());
            assert!(!config.client_synthetics().unwrap().debug());
        });
    }

    #[test]
    fn clients_builds_all_three() {
        let clients = Config::default()
            .with_api_key("k")
            .with_region(Region::Staging)
            .clients()
            .unwrap();
        let staging = "https://staging-api.newrelic.com/v2";
        assert_eq!(clients.client.base_url(), staging);
        assert_eq!(clients.infra.base_url(), staging);
        assert_eq!(clients.synthetics.base_url(), staging);
    }

    #[test]
    fn clients_fails_without_key() {
        assert!(Config::default().clients().is_err());
    }
}
