//! Configuration types for the shift ledger.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::SalaryRule;

/// Reconciliation policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationPolicy {
    /// Largest accepted magnitude of the meter/trip revenue discrepancy
    /// before the closed shift is flagged for audit.
    pub tolerance: Decimal,
}

/// Settlement configuration from `settlement.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Reconciliation policy.
    pub reconciliation: ReconciliationPolicy,
    /// Name of the rule applied to drivers without an assignment.
    pub default_rule: String,
}

/// Salary rule catalogue from `salary_rules.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleCatalog {
    /// All known commission rules.
    pub rules: Vec<SalaryRule>,
}

/// The complete fleet configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    settlement: SettlementConfig,
    rules: Vec<SalaryRule>,
    default_rule_index: usize,
}

impl FleetConfig {
    /// Assembles a fleet configuration from its component parts.
    ///
    /// Validates every rule and resolves the default rule by name.
    pub fn new(settlement: SettlementConfig, rules: Vec<SalaryRule>) -> LedgerResult<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        let default_rule_index = rules
            .iter()
            .position(|r| r.name == settlement.default_rule)
            .ok_or_else(|| {
                LedgerError::validation(
                    "default_rule",
                    format!("unknown rule '{}'", settlement.default_rule),
                )
            })?;
        Ok(Self {
            settlement,
            rules,
            default_rule_index,
        })
    }

    /// Returns the reconciliation tolerance.
    pub fn tolerance(&self) -> Decimal {
        self.settlement.reconciliation.tolerance
    }

    /// Returns the rule applied to drivers without an assignment.
    pub fn default_rule(&self) -> &SalaryRule {
        &self.rules[self.default_rule_index]
    }

    /// Looks up a rule by name.
    pub fn get_rule(&self, name: &str) -> Option<&SalaryRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Returns all known rules.
    pub fn rules(&self) -> &[SalaryRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn settlement(default_rule: &str) -> SettlementConfig {
        SettlementConfig {
            reconciliation: ReconciliationPolicy {
                tolerance: dec("1.00"),
            },
            default_rule: default_rule.to_string(),
        }
    }

    fn fixed_rule(name: &str) -> SalaryRule {
        SalaryRule {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: RuleKind::Fixed { rate: dec("80") },
            window: None,
            active: true,
            non_deductible: vec![],
        }
    }

    #[test]
    fn test_default_rule_is_resolved_by_name() {
        let config =
            FleetConfig::new(settlement("day_fixed"), vec![fixed_rule("day_fixed")]).unwrap();
        assert_eq!(config.default_rule().name, "day_fixed");
        assert_eq!(config.tolerance(), dec("1.00"));
    }

    #[test]
    fn test_unknown_default_rule_is_rejected() {
        let err =
            FleetConfig::new(settlement("missing"), vec![fixed_rule("day_fixed")]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { .. }));
    }

    #[test]
    fn test_invalid_rule_in_catalogue_is_rejected() {
        let mut bad = fixed_rule("bad");
        bad.kind = RuleKind::Variable {
            rate_pct: Decimal::ZERO,
        };
        let err = FleetConfig::new(settlement("bad"), vec![bad]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { .. }));
    }

    #[test]
    fn test_get_rule_by_name() {
        let config = FleetConfig::new(
            settlement("day_fixed"),
            vec![fixed_rule("day_fixed"), fixed_rule("night_fixed")],
        )
        .unwrap();
        assert!(config.get_rule("night_fixed").is_some());
        assert!(config.get_rule("weekend").is_none());
    }
}
