//! Pack configuration loading and validation.
//!
//! The config document maps pack-type names to [`PackDefinition`]s. Pack
//! types are kept in a `BTreeMap` so batch runs iterate them in a stable
//! order regardless of how the JSON was written.

use crate::catalog::Rarity;
use crate::compose::PackDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("pack config not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read pack config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse pack config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pack type {pack_type:?}: invalid weight {weight} for {rarity}")]
    InvalidWeight {
        pack_type: String,
        rarity: Rarity,
        weight: f64,
    },
}

/// The full pack configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackConfig {
    /// Default pack size for definitions that don't set their own
    pub items_per_pack: Option<usize>,
    /// Pack-type name -> composition policy
    pub packs: BTreeMap<String, PackDefinition>,
}

impl PackConfig {
    /// Load and validate a pack configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: PackConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weights that would corrupt the weighted draw (negative,
    /// NaN, or infinite).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, def) in &self.packs {
            for (&rarity, &weight) in &def.distribution {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        pack_type: name.clone(),
                        rarity,
                        weight,
                    });
                }
            }
        }
        Ok(())
    }
}
