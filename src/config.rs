use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::ZoneTier;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub geocoder: GeocoderConfig,
    pub boundaries: Vec<BoundaryConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// One configured zone boundary ring.
///
/// Boundaries are injected data so ring updates never require a rebuild.
#[derive(Debug, Deserialize, Clone)]
pub struct BoundaryConfig {
    pub tier: ZoneTier,
    /// Ordered ring vertices in (longitude, latitude) order.
    pub ring: Vec<[f64; 2]>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}
