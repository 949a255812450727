// ============================================================
// APPLICATION CONFIGURATION
// ============================================================
// Defaults, then prepdocs.toml, then PREPDOCS_* environment variables

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "prepdocs.toml";
pub const ENV_PREFIX: &str = "PREPDOCS_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "prepdocs_lib=debug"
    pub log_filter: String,

    /// Pretty-print each page instead of writing JSON lines
    pub pretty: bool,

    /// Output file; stdout when unset
    pub output: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            pretty: false,
            output: None,
        }
    }
}

impl AppConfig {
    /// Layered figment used by [`AppConfig::load`]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate configuration from all sources
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(AppError::ConfigError(
                "log_filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
