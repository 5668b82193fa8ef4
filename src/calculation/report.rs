//! Shift summary aggregation.
//!
//! The reporter is the only component that exposes computed statistics to
//! callers. The ledger invokes it at close time and stores its output
//! verbatim as the shift's frozen totals.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::salary::{apply_bonus, compute_gross, compute_net};
use crate::calculation::Reconciliation;
use crate::error::LedgerResult;
use crate::models::{Expense, PaymentMethod, SalaryRule, ShiftSummary, Trip};

/// Builds the externally visible summary for a shift.
///
/// `bonus` is the optional bonus rule already confirmed to qualify for the
/// shift; divide-by-zero cases (no distance, no trips) yield zero ratios
/// instead of faults.
pub fn summarize(
    shift_id: Uuid,
    reconciliation: &Reconciliation,
    trips: &[Trip],
    expenses: &[Expense],
    rule: &SalaryRule,
    bonus: Option<&SalaryRule>,
    declared_cash: Decimal,
) -> LedgerResult<ShiftSummary> {
    let total_revenue = reconciliation.trip_revenue;
    let total_distance = reconciliation.total_distance;
    let trip_count = trips.len() as u32;

    let ratio_revenue_per_distance = if total_distance.is_zero() {
        Decimal::ZERO
    } else {
        total_revenue / total_distance
    };
    let average_revenue_per_trip = if trip_count == 0 {
        Decimal::ZERO
    } else {
        total_revenue / Decimal::from(trip_count)
    };

    let mut expenses_by_category: BTreeMap<_, Decimal> = BTreeMap::new();
    let mut expenses_by_payment: BTreeMap<_, Decimal> = BTreeMap::new();
    let mut expenses_total = Decimal::ZERO;
    for expense in expenses {
        *expenses_by_category.entry(expense.category).or_default() += expense.amount;
        *expenses_by_payment.entry(expense.payment).or_default() += expense.amount;
        expenses_total += expense.amount;
    }

    let cash_collected: Decimal = trips
        .iter()
        .filter(|t| t.payment == PaymentMethod::Cash)
        .map(|t| t.collected)
        .sum();
    let cash_variance = declared_cash - cash_collected;

    let mut gross_pay = compute_gross(total_revenue, rule)?;
    if let Some(bonus_rule) = bonus {
        gross_pay = apply_bonus(gross_pay, bonus_rule)?;
    }
    let net_pay = compute_net(gross_pay, expenses, &rule.non_deductible);

    Ok(ShiftSummary {
        shift_id,
        total_revenue,
        meter_revenue: reconciliation.meter_revenue,
        total_distance,
        trip_count,
        ratio_revenue_per_distance,
        average_revenue_per_trip,
        expenses_by_category,
        expenses_by_payment,
        expenses_total,
        cash_collected,
        declared_cash,
        cash_variance,
        gross_pay,
        net_pay,
        reconciliation: reconciliation.flag,
        computed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CounterPair, ExpenseCategory, ExpenseDraft, MeterGrid, RuleKind, TripDraft,
    };
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rule() -> SalaryRule {
        SalaryRule {
            id: Uuid::new_v4(),
            name: "standard_tiered".to_string(),
            kind: RuleKind::Tiered {
                threshold: dec("180"),
                base_pct: dec("40"),
                surplus_pct: dec("30"),
            },
            window: None,
            active: true,
            non_deductible: vec![ExpenseCategory::Toll],
        }
    }

    fn trip(collected: &str, payment: PaymentMethod) -> Trip {
        Trip::from_draft(
            Uuid::nil(),
            1,
            TripDraft {
                pickup_label: "a".to_string(),
                dropoff_label: "b".to_string(),
                pickup_index: dec("0"),
                dropoff_index: dec("5"),
                picked_up_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
                dropped_off_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 20, 0).unwrap(),
                metered_price: dec(collected),
                collected: dec(collected),
                payment,
                client_ref: None,
            },
        )
    }

    fn expense(category: ExpenseCategory, payment: PaymentMethod, amount: &str) -> Expense {
        Expense::from_draft(
            Uuid::nil(),
            ExpenseDraft {
                category,
                amount: dec(amount),
                payment,
                incurred_at: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
                note: None,
            },
        )
    }

    fn reconciliation(trip_revenue: &str, distance: &str) -> Reconciliation {
        crate::calculation::reconcile(
            &MeterGrid {
                odometer: CounterPair {
                    start: Some(Decimal::ZERO),
                    end: Some(dec(distance)),
                },
                ..MeterGrid::default()
            },
            &[trip(trip_revenue, PaymentMethod::Cash)],
            dec("10000"),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_totals() {
        let trips = vec![
            trip("200", PaymentMethod::Cash),
            trip("100", PaymentMethod::Card),
        ];
        let expenses = vec![
            expense(ExpenseCategory::Fuel, PaymentMethod::Card, "62.10"),
            expense(ExpenseCategory::Toll, PaymentMethod::Cash, "14.80"),
        ];
        let recon = reconciliation("300", "230");

        let summary = summarize(
            Uuid::nil(),
            &recon,
            &trips,
            &expenses,
            &rule(),
            None,
            dec("200"),
        )
        .unwrap();

        assert_eq!(summary.total_revenue, dec("300"));
        assert_eq!(summary.trip_count, 2);
        assert_eq!(summary.average_revenue_per_trip, dec("150"));
        assert_eq!(summary.cash_collected, dec("200"));
        assert_eq!(summary.cash_variance, Decimal::ZERO);
        assert_eq!(summary.expenses_total, dec("76.90"));
        assert_eq!(
            summary.expenses_by_category.get(&ExpenseCategory::Fuel),
            Some(&dec("62.10"))
        );
        assert_eq!(
            summary.expenses_by_payment.get(&PaymentMethod::Cash),
            Some(&dec("14.80"))
        );
        // Tiered gross 108, minus fuel only (tolls are non-deductible).
        assert_eq!(summary.gross_pay, dec("108.0"));
        assert_eq!(summary.net_pay, dec("45.90"));
    }

    #[test]
    fn test_zero_distance_yields_zero_ratio() {
        let recon = reconciliation("300", "0");
        let summary = summarize(
            Uuid::nil(),
            &recon,
            &[trip("300", PaymentMethod::Cash)],
            &[],
            &rule(),
            None,
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(summary.ratio_revenue_per_distance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_trips_yields_zero_average() {
        let recon = crate::calculation::reconcile(&MeterGrid::default(), &[], dec("1")).unwrap();
        let summary = summarize(
            Uuid::nil(),
            &recon,
            &[],
            &[],
            &rule(),
            None,
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(summary.average_revenue_per_trip, Decimal::ZERO);
        assert_eq!(summary.trip_count, 0);
        assert_eq!(summary.gross_pay, Decimal::ZERO);
    }

    #[test]
    fn test_bonus_layers_on_gross() {
        let bonus = SalaryRule {
            id: Uuid::new_v4(),
            name: "late_notice_cover".to_string(),
            kind: RuleKind::Bonus { amount: dec("25") },
            window: None,
            active: true,
            non_deductible: vec![],
        };
        let recon = reconciliation("300", "230");
        let summary = summarize(
            Uuid::nil(),
            &recon,
            &[trip("300", PaymentMethod::Cash)],
            &[],
            &rule(),
            Some(&bonus),
            dec("300"),
        )
        .unwrap();
        assert_eq!(summary.gross_pay, dec("133.0"));
    }

    #[test]
    fn test_cash_variance_reflects_shortfall() {
        let recon = reconciliation("300", "230");
        let summary = summarize(
            Uuid::nil(),
            &recon,
            &[trip("300", PaymentMethod::Cash)],
            &[],
            &rule(),
            None,
            dec("280"),
        )
        .unwrap();
        assert_eq!(summary.cash_variance, dec("-20"));
    }

    #[test]
    fn test_flag_travels_into_summary() {
        let recon = crate::calculation::reconcile(
            &MeterGrid {
                pickup_fee: CounterPair {
                    start: Some(Decimal::ZERO),
                    end: Some(dec("500")),
                },
                ..MeterGrid::default()
            },
            &[],
            dec("1"),
        )
        .unwrap();
        let summary =
            summarize(Uuid::nil(), &recon, &[], &[], &rule(), None, Decimal::ZERO).unwrap();
        let flag = summary.reconciliation.expect("expected flag");
        assert_eq!(flag.discrepancy, dec("500"));
    }
}
