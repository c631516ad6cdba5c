//! # cura-config
//!
//! Layered configuration loading for CuraLink using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CURALINK_*` prefix, `__` as separator)
//! 2. Legacy environment names: `PORT`, `FRONTEND_ORIGIN`, `APILAYER_API_KEY`
//! 3. Project-level `.curalink/config.toml`
//! 4. User-level `~/.config/curalink/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CURALINK_SERVER__PORT` -> `server.port`,
//! `CURALINK_KEYWORDS__API_KEY` -> `keywords.api_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cura_config::CuraConfig;
//!
//! let config = CuraConfig::load_with_dotenv().expect("config");
//! if !config.keywords.is_configured() {
//!     println!("keyword API disabled, analysis uses local matching");
//! }
//! ```

mod database;
mod error;
mod general;
mod keywords;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use keywords::KeywordApiConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Legacy variable names read without the `CURALINK_` prefix.
const LEGACY_ENV: &[&str] = &["PORT", "FRONTEND_ORIGIN", "APILAYER_API_KEY"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CuraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub keywords: KeywordApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CuraConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".curalink/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment = figment.merge(Env::raw().only(LEGACY_ENV).map(|key| {
            if key.as_str().eq_ignore_ascii_case("PORT") {
                "server.port".into()
            } else if key.as_str().eq_ignore_ascii_case("FRONTEND_ORIGIN") {
                "server.cors_origin".into()
            } else {
                "keywords.api_key".into()
            }
        }));

        figment.merge(Env::prefixed("CURALINK_").split("__"))
    }

    /// Reject values that would make the server misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("general.dashboard_limit", self.general.dashboard_limit),
            ("general.profile_limit", self.general.profile_limit),
            ("general.collaborator_limit", self.general.collaborator_limit),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                });
            }
        }
        if self.keywords.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "keywords.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("curalink").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
