//! Taximeter reconciliation.
//!
//! Cross-checks the revenue derived from the taximeter counters against the
//! fares actually recorded as trips. A discrepancy outside tolerance is
//! recorded for audit but never blocks closing the shift: it reflects
//! real-world driver-reporting imprecision, not a software fault.

use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{MeterGrid, ReconciliationFlag, Trip};

/// The reconciled revenue/distance tally for a shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    /// Kilometres covered per the dashboard odometer.
    pub total_distance: Decimal,
    /// Revenue derived from the taximeter counters:
    /// pickup-fee delta minus fare-drops delta.
    pub meter_revenue: Decimal,
    /// Sum of amounts collected over all trips. This is the authoritative
    /// revenue figure used for salary computation.
    pub trip_revenue: Decimal,
    /// `meter_revenue - trip_revenue`.
    pub discrepancy: Decimal,
    /// Present when the discrepancy magnitude exceeds the tolerance.
    pub flag: Option<ReconciliationFlag>,
}

/// Reconciles a shift's meter readings with its trip list.
///
/// Fails with a validation error when the odometer bracket regresses;
/// counter pairs that were never recorded contribute a zero delta.
pub fn reconcile(
    meters: &MeterGrid,
    trips: &[Trip],
    tolerance: Decimal,
) -> LedgerResult<Reconciliation> {
    let total_distance = meters.odometer.delta();
    if total_distance < Decimal::ZERO {
        return Err(LedgerError::validation(
            "odometer",
            format!("negative distance {total_distance}"),
        ));
    }

    let meter_revenue = meters.pickup_fee.delta() - meters.fare_drops.delta();
    let trip_revenue: Decimal = trips.iter().map(|t| t.collected).sum();
    let discrepancy = meter_revenue - trip_revenue;

    let flag = if discrepancy.abs() > tolerance {
        Some(ReconciliationFlag {
            discrepancy,
            tolerance,
        })
    } else {
        None
    };

    Ok(Reconciliation {
        total_distance,
        meter_revenue,
        trip_revenue,
        discrepancy,
        flag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CounterPair, PaymentMethod, TripDraft};
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pair(start: &str, end: &str) -> CounterPair {
        CounterPair {
            start: Some(dec(start)),
            end: Some(dec(end)),
        }
    }

    fn meters() -> MeterGrid {
        MeterGrid {
            odometer: pair("120450", "120680"),
            pickup_fee: pair("500", "950"),
            in_load_distance: pair("80000", "80160"),
            fare_drops: pair("10", "47"),
        }
    }

    fn trip(collected: &str) -> Trip {
        Trip::from_draft(
            Uuid::nil(),
            1,
            TripDraft {
                pickup_label: "a".to_string(),
                dropoff_label: "b".to_string(),
                pickup_index: dec("0"),
                dropoff_index: dec("1"),
                picked_up_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
                dropped_off_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 10, 0).unwrap(),
                metered_price: dec(collected),
                collected: dec(collected),
                payment: PaymentMethod::Cash,
                client_ref: None,
            },
        )
    }

    #[test]
    fn test_distance_is_odometer_delta() {
        let result = reconcile(&meters(), &[], dec("1")).unwrap();
        assert_eq!(result.total_distance, dec("230"));
    }

    #[test]
    fn test_meter_revenue_formula() {
        // (950 - 500) - (47 - 10) = 413
        let result = reconcile(&meters(), &[], dec("1000")).unwrap();
        assert_eq!(result.meter_revenue, dec("413"));
    }

    #[test]
    fn test_discrepancy_within_tolerance_passes_silently() {
        let trips = vec![trip("200"), trip("212.50")];
        let result = reconcile(&meters(), &trips, dec("1")).unwrap();
        assert_eq!(result.trip_revenue, dec("412.50"));
        assert_eq!(result.discrepancy, dec("0.50"));
        assert!(result.flag.is_none());
    }

    #[test]
    fn test_discrepancy_outside_tolerance_is_flagged_not_fatal() {
        let trips = vec![trip("200")];
        let result = reconcile(&meters(), &trips, dec("1")).unwrap();
        assert_eq!(result.discrepancy, dec("213"));
        let flag = result.flag.expect("expected reconciliation flag");
        assert_eq!(flag.discrepancy, dec("213"));
        assert_eq!(flag.tolerance, dec("1"));
    }

    #[test]
    fn test_negative_discrepancy_is_flagged_by_magnitude() {
        // Trips report more than the meter shows.
        let trips = vec![trip("500")];
        let result = reconcile(&meters(), &trips, dec("1")).unwrap();
        assert_eq!(result.discrepancy, dec("-87"));
        assert!(result.flag.is_some());
    }

    #[test]
    fn test_negative_distance_is_an_error() {
        let mut grid = meters();
        grid.odometer = pair("120680", "120450");
        let err = reconcile(&grid, &[], dec("1")).unwrap_err();
        assert!(matches!(err, crate::error::LedgerError::Validation { .. }));
    }

    #[test]
    fn test_unset_counter_pairs_contribute_zero() {
        let grid = MeterGrid {
            odometer: pair("100", "150"),
            ..MeterGrid::default()
        };
        let result = reconcile(&grid, &[], dec("1")).unwrap();
        assert_eq!(result.meter_revenue, Decimal::ZERO);
        assert_eq!(result.total_distance, dec("50"));
    }
}
