//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the fleet
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};

use super::types::{FleetConfig, RuleCatalog, SettlementConfig};

/// Loads and provides access to the fleet configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/fleet/
/// ├── settlement.yaml    # Reconciliation policy and default rule
/// └── salary_rules.yaml  # Commission rule catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fleet").unwrap();
/// let rule = loader.config().default_rule();
/// println!("Default rule: {}", rule.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FleetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fleet")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rule catalogue fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        let settlement_path = path.join("settlement.yaml");
        let settlement = Self::load_yaml::<SettlementConfig>(&settlement_path)?;

        let rules_path = path.join("salary_rules.yaml");
        let catalog = Self::load_yaml::<RuleCatalog>(&rules_path)?;

        let config = FleetConfig::new(settlement, catalog.rules)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying fleet configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }
}
