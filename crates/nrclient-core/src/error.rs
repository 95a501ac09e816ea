use nrclient_api::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown region {0:?}, expected one of: us, eu, staging")]
    UnknownRegion(String),

    #[error("unknown log level {0:?}, expected one of: panic, fatal, error, warn, info, debug, trace")]
    UnknownLogLevel(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}
