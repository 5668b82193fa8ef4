//! Salary rule model and related types.
//!
//! A salary rule is a named commission policy. The rule kind is a tagged
//! union so that `compute_gross` can match exhaustively and adding a new
//! kind is a compile-time-checked change.

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseCategory;

/// Day of the week in an applicability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDay {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl RuleDay {
    fn matches(self, weekday: Weekday) -> bool {
        matches!(
            (self, weekday),
            (RuleDay::Mon, Weekday::Mon)
                | (RuleDay::Tue, Weekday::Tue)
                | (RuleDay::Wed, Weekday::Wed)
                | (RuleDay::Thu, Weekday::Thu)
                | (RuleDay::Fri, Weekday::Fri)
                | (RuleDay::Sat, Weekday::Sat)
                | (RuleDay::Sun, Weekday::Sun)
        )
    }
}

/// Time-of-day/day-of-week window limiting when a rule applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicabilityWindow {
    /// Days of the week the window covers. Empty means every day.
    #[serde(default)]
    pub days: Vec<RuleDay>,
    /// Start of the daily window, inclusive.
    pub from: NaiveTime,
    /// End of the daily window, exclusive. A value before `from` wraps
    /// past midnight (e.g. 22:00 to 06:00).
    pub until: NaiveTime,
}

impl ApplicabilityWindow {
    /// Returns true when the instant falls inside the window.
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        if !self.days.is_empty() && !self.days.iter().any(|d| d.matches(at.weekday())) {
            return false;
        }
        let time = at.time();
        if self.from <= self.until {
            self.from <= time && time < self.until
        } else {
            time >= self.from || time < self.until
        }
    }
}

/// The commission formula of a salary rule, one payload shape per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// A flat amount per shift regardless of revenue.
    Fixed {
        /// The amount paid per shift.
        rate: Decimal,
    },
    /// A straight percentage of revenue.
    Variable {
        /// Commission percentage applied to the whole revenue.
        rate_pct: Decimal,
    },
    /// Revenue split into a base band and a surplus band, each at its own
    /// percentage.
    Tiered {
        /// Revenue boundary between the base and surplus bands.
        threshold: Decimal,
        /// Percentage applied to revenue up to the threshold.
        base_pct: Decimal,
        /// Percentage applied to revenue above the threshold.
        surplus_pct: Decimal,
    },
    /// An additive adjustment layered on top of a primary rule's result.
    /// Never applies standalone.
    Bonus {
        /// The amount added to the primary result.
        amount: Decimal,
    },
}

/// A named commission policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRule {
    /// Unique identifier for the rule.
    pub id: Uuid,
    /// Human-readable rule name (e.g. "standard_tiered").
    pub name: String,
    /// The commission formula.
    #[serde(flatten)]
    pub kind: RuleKind,
    /// Optional window limiting when the rule applies.
    #[serde(default)]
    pub window: Option<ApplicabilityWindow>,
    /// Whether the rule may currently be assigned.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Expense categories excluded from net-pay deduction (e.g. reimbursed
    /// tolls).
    #[serde(default)]
    pub non_deductible: Vec<ExpenseCategory>,
}

fn default_active() -> bool {
    true
}

impl SalaryRule {
    /// Validates the rule parameters.
    ///
    /// Variable and tiered rules require a positive commission percentage;
    /// tiered rules additionally require a non-negative threshold.
    pub fn validate(&self) -> LedgerResult<()> {
        match &self.kind {
            RuleKind::Fixed { rate } => {
                if *rate < Decimal::ZERO {
                    return Err(LedgerError::validation("rate", "must not be negative"));
                }
            }
            RuleKind::Variable { rate_pct } => {
                if *rate_pct <= Decimal::ZERO {
                    return Err(LedgerError::validation(
                        "rate_pct",
                        "variable rate must be greater than zero",
                    ));
                }
            }
            RuleKind::Tiered {
                threshold,
                base_pct,
                surplus_pct,
            } => {
                if *threshold < Decimal::ZERO {
                    return Err(LedgerError::validation(
                        "threshold",
                        "threshold must not be negative",
                    ));
                }
                if *base_pct < Decimal::ZERO {
                    return Err(LedgerError::validation(
                        "base_pct",
                        "base rate must not be negative",
                    ));
                }
                if *surplus_pct <= Decimal::ZERO {
                    return Err(LedgerError::validation(
                        "surplus_pct",
                        "surplus rate must be greater than zero",
                    ));
                }
            }
            RuleKind::Bonus { amount } => {
                if *amount <= Decimal::ZERO {
                    return Err(LedgerError::validation(
                        "amount",
                        "bonus amount must be greater than zero",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns true when the rule is active and its window (if any) covers
    /// the given instant.
    pub fn applies_at(&self, at: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        match &self.window {
            Some(window) => window.covers(at),
            None => true,
        }
    }
}
