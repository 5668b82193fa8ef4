//! Configuration loading and management for the shift ledger.
//!
//! This module provides functionality to load the settlement policy and the
//! salary rule catalogue from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_ledger::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/fleet").unwrap();
//! println!("Default rule: {}", loader.config().default_rule().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{FleetConfig, ReconciliationPolicy, RuleCatalog, SettlementConfig};
