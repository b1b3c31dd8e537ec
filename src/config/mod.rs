//! Configuration management

use crate::domain::shared::DeviceEndpoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the optional configuration file
const DEFAULT_CONFIG_PATH: &str = "/etc/callpathd/config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: DeviceEndpoint,
    pub stream: StreamConfig,
}

/// Hardware parameters applied to both PCM directions.
///
/// The values have little relevance since no audio data is written;
/// only the stream lifecycle matters. Samples are fixed at 16-bit
/// little-endian.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub channels: u32,
    pub rate: u32,
    pub period_size: u32,
    pub period_count: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            rate: 8000,
            period_size: 160,
            period_count: 2,
        }
    }
}

/// File-backed settings; everything not supplied on the command line
#[derive(Debug, Clone, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    stream: StreamConfig,
}

impl Config {
    /// Build the configuration for the given endpoint.
    ///
    /// The stream parameters come from the optional config file merged
    /// with `CALLPATHD_`-prefixed environment variables; the endpoint is
    /// always the command-line one.
    pub fn load(endpoint: DeviceEndpoint) -> Result<Self, ConfigError> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_PATH).required(false))
            .add_source(
                config::Environment::with_prefix("CALLPATHD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(Self {
            endpoint,
            stream: settings.stream,
        })
    }
}
