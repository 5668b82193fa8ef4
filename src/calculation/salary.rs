//! Salary rule engine.
//!
//! Pure functions mapping revenue and a commission rule to pay. They are
//! invoked once at close time and their result is frozen, so they must be
//! side-effect-free and bit-deterministic for identical inputs.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseCategory, RuleKind, SalaryRule};

/// Computes the gross pay for the given revenue under a rule.
///
/// - `Fixed` pays the flat rate regardless of revenue.
/// - `Variable` pays `revenue * rate_pct / 100`.
/// - `Tiered` splits revenue at the threshold: the base band pays
///   `base_pct`, the surplus band pays `surplus_pct`.
/// - `Bonus` never applies standalone and is rejected here; see
///   [`apply_bonus`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shift_ledger::calculation::compute_gross;
/// use shift_ledger::models::{RuleKind, SalaryRule};
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let rule = SalaryRule {
///     id: Uuid::new_v4(),
///     name: "standard_tiered".to_string(),
///     kind: RuleKind::Tiered {
///         threshold: Decimal::from_str("180").unwrap(),
///         base_pct: Decimal::from_str("40").unwrap(),
///         surplus_pct: Decimal::from_str("30").unwrap(),
///     },
///     window: None,
///     active: true,
///     non_deductible: vec![],
/// };
/// let gross = compute_gross(Decimal::from_str("300").unwrap(), &rule).unwrap();
/// assert_eq!(gross, Decimal::from_str("108.0").unwrap());
/// ```
pub fn compute_gross(revenue: Decimal, rule: &SalaryRule) -> LedgerResult<Decimal> {
    if revenue < Decimal::ZERO {
        return Err(LedgerError::validation(
            "revenue",
            "revenue must not be negative",
        ));
    }
    let hundred = Decimal::ONE_HUNDRED;
    match &rule.kind {
        RuleKind::Fixed { rate } => Ok(*rate),
        RuleKind::Variable { rate_pct } => Ok(revenue * *rate_pct / hundred),
        RuleKind::Tiered {
            threshold,
            base_pct,
            surplus_pct,
        } => {
            let base = revenue.min(*threshold);
            let surplus = (revenue - *threshold).max(Decimal::ZERO);
            Ok(base * *base_pct / hundred + surplus * *surplus_pct / hundred)
        }
        RuleKind::Bonus { .. } => Err(LedgerError::validation(
            "rule",
            format!("bonus rule '{}' cannot apply standalone", rule.name),
        )),
    }
}

/// Layers a bonus rule's amount on top of a primary rule's result.
///
/// Fails when the rule is not a bonus rule; the qualifying condition
/// (applicability window, active flag) is checked by the caller.
pub fn apply_bonus(gross: Decimal, rule: &SalaryRule) -> LedgerResult<Decimal> {
    match &rule.kind {
        RuleKind::Bonus { amount } => Ok(gross + *amount),
        _ => Err(LedgerError::validation(
            "rule",
            format!("rule '{}' is not a bonus rule", rule.name),
        )),
    }
}

/// Computes net pay: gross minus deductible expenses.
///
/// Categories listed in `non_deductible` (e.g. reimbursed tolls) are left
/// out of the deduction. The result may go negative; the engine does not
/// clamp debts.
pub fn compute_net(
    gross: Decimal,
    expenses: &[Expense],
    non_deductible: &[ExpenseCategory],
) -> Decimal {
    let deducted: Decimal = expenses
        .iter()
        .filter(|e| !non_deductible.contains(&e.category))
        .map(|e| e.amount)
        .sum();
    gross - deducted
}
