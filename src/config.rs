use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::enrich::{EnrichOptions, FanOut};

/// Environment variable naming a config file that replaces the embedded one.
pub const CONFIG_PATH_ENV: &str = "POKEDEX_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub pokemon: PokemonConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokemonConfig {
    pub api_url: String,
    #[serde(default = "default_resource")]
    pub resource: String,
    pub image_url: String,
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
    /// Per-request timeout in seconds.
    pub timeout: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EnrichmentConfig {
    /// Absent means every detail request is issued at once.
    pub max_concurrency: Option<usize>,
    #[serde(default = "default_fallback_type")]
    pub fallback_type: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            fallback_type: default_fallback_type(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

fn default_resource() -> String {
    "pokemon".to_string()
}

fn default_list_limit() -> u32 {
    2000
}

fn default_fallback_type() -> String {
    "normal".to_string()
}

impl Config {
    /// Loads the file named by [`CONFIG_PATH_ENV`], or the embedded defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        DEFAULT_CONFIG.parse()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!("Reading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.pokemon.list_limit == 0 {
            return Err(ConfigError::Invalid(
                "pokemon.list_limit must be greater than zero".to_string(),
            ));
        }
        if self.enrichment.max_concurrency == Some(0) {
            return Err(ConfigError::Invalid(
                "enrichment.max_concurrency must be greater than zero when set".to_string(),
            ));
        }
        if self.enrichment.fallback_type.is_empty() {
            return Err(ConfigError::Invalid(
                "enrichment.fallback_type cannot be empty".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn enrich_options(&self) -> EnrichOptions {
        let fan_out = self
            .enrichment
            .max_concurrency
            .and_then(NonZeroUsize::new)
            .map_or(FanOut::Unbounded, FanOut::Limited);

        EnrichOptions {
            fan_out,
            fallback_type: self.enrichment.fallback_type.clone(),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s).map_err(|e| {
            tracing::error!("Failed to parse configuration: {}", e);
            ConfigError::from(e)
        })?;
        config.validate()
    }
}
