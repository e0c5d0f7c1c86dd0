//! `recon.toml` loading.
//!
//! ```toml
//! [constants]
//! gravity_fps2 = 32.174
//! air_density_slug_ft3 = 0.002377
//!
//! [constants.friction]
//! dry_asphalt = 0.7
//! wet_asphalt = 0.5
//! gravel = 0.4
//! snow = 0.2
//! ice = 0.1
//!
//! [defaults]
//! reaction_time_s = 1.5
//! following_time_s = 2.0
//! stiffness_lb_per_in = 150.0
//! total_loss_threshold = 0.75
//! ```
//!
//! Every section and key is optional; omitted values take the standard
//! constants.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use recon_core::{CalculationDefaults, PhysicalConstants, ReconResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub constants: PhysicalConstants,
    pub defaults: CalculationDefaults,
}

impl CliConfig {
    pub fn validate(&self) -> ReconResult<()> {
        self.constants.validate()?;
        self.defaults.validate()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file, or the standard config when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(CliConfig::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = CliConfig::from_toml(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
