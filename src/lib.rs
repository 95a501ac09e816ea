//! Region-aware configuration and client construction for the New Relic
//! REST, Infrastructure and Synthetics APIs.
//!
//! ```no_run
//! use nrclient::{Config, Region};
//!
//! # fn main() -> Result<(), nrclient::ConfigError> {
//! let config = Config::default()
//!     .with_api_key("NRAK-...")
//!     .with_region(Region::Eu);
//! let rest = config.client()?;
//! assert_eq!(rest.base_url(), "https://api.eu.newrelic.com/v2");
//! # Ok(())
//! # }
//! ```

pub use nrclient_api::{
    ApiClient, ApiConfig, ClientError, InfraClient, SyntheticsClient, SyntheticsConfig,
};
pub use nrclient_core::{
    Config, ConfigError, LogLevel, Logger, LoggerBuilder, ProviderClients, Region, Secret,
};

pub mod http {
    pub use nrclient_api::http::{DEFAULT_USER_AGENT, build_client};
}
