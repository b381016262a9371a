//! Service configuration, loaded from TOML.
//!
//! Every section and field has a default, so an empty file (or no file) is a
//! valid configuration:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [simulation]
//! seed = 7
//!
//! [market]
//! records = 1000
//! seed = 42
//!
//! [model.classifier]
//! n_estimators = 100
//!
//! [scenario]
//! month = 10
//! truck_type = "Open Body"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use fleetpulse_core::fleet::SimulationConfig;
use fleetpulse_core::market::MarketGeneratorConfig;
use fleetpulse_core::model::{ModelConfig, OpportunityQuery};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Where the HTTP adapter listens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Seed for the live fleet feed plus the per-tick tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetSimulationConfig {
    /// Seed for the simulator's random source.
    pub seed: u64,
    pub tuning: SimulationConfig,
}

impl Default for FleetSimulationConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            tuning: SimulationConfig::default(),
        }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetPulseConfig {
    pub server: ServerConfig,
    pub simulation: FleetSimulationConfig,
    pub market: MarketGeneratorConfig,
    pub model: ModelConfig,
    /// The fixed scenario scored on every poll.
    pub scenario: OpportunityQuery,
}

impl FleetPulseConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
