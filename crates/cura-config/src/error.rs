use thiserror::Error;

/// Failure to load or validate [`crate::CuraConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into the config.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// `server.host`/`server.port` do not form a socket address.
    #[error("Invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
