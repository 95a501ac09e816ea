//! Configuration, region resolution, structured logging and client factories.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod region;
pub mod secret;

pub use bootstrap::ProviderClients;
pub use config::Config;
pub use error::ConfigError;
pub use logging::{LogLevel, Logger, LoggerBuilder};
pub use region::Region;
pub use secret::Secret;
