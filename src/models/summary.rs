//! Frozen shift summary models.
//!
//! This module contains the [`ShiftSummary`] value object computed once at
//! close time and stored verbatim on the shift. It is never recomputed from
//! live data afterwards, so later (incorrect) mutation of trip or expense
//! records can not silently drift the settled figures.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ExpenseCategory, PaymentMethod};

/// A recorded discrepancy between meter-derived and trip-derived revenue.
///
/// This is an audit annotation, not an error: a flagged shift still closes
/// normally, and the flag travels with the frozen totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationFlag {
    /// `meter_revenue - trip_revenue` at close time.
    pub discrepancy: Decimal,
    /// The tolerance that was exceeded.
    pub tolerance: Decimal,
}

/// The externally visible summary of a shift.
///
/// Produced by the aggregation reporter, frozen on the shift at close, and
/// handed as-is to the document renderer for the printable report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// The shift the summary belongs to.
    pub shift_id: Uuid,
    /// Revenue actually recorded on trips. This is the authoritative figure
    /// used for salary computation.
    pub total_revenue: Decimal,
    /// Revenue derived from the taximeter counters, kept for reconciliation.
    pub meter_revenue: Decimal,
    /// Kilometres covered per the dashboard odometer.
    pub total_distance: Decimal,
    /// Number of trips recorded on the shift.
    pub trip_count: u32,
    /// Revenue per distance unit. Zero when no distance was covered.
    pub ratio_revenue_per_distance: Decimal,
    /// Revenue per trip. Zero when no trips were recorded.
    pub average_revenue_per_trip: Decimal,
    /// Expense totals grouped by category.
    pub expenses_by_category: BTreeMap<ExpenseCategory, Decimal>,
    /// Expense totals grouped by payment method.
    pub expenses_by_payment: BTreeMap<PaymentMethod, Decimal>,
    /// Sum of all expenses on the shift.
    pub expenses_total: Decimal,
    /// Sum of cash-method trip collections.
    pub cash_collected: Decimal,
    /// Cash amount the driver declared at close.
    pub declared_cash: Decimal,
    /// `declared_cash - cash_collected`.
    pub cash_variance: Decimal,
    /// Gross pay from the salary rule, before expense deduction.
    pub gross_pay: Decimal,
    /// Gross pay minus deductible expenses.
    pub net_pay: Decimal,
    /// Present when the meter/trip revenue discrepancy exceeded tolerance.
    pub reconciliation: Option<ReconciliationFlag>,
    /// When the summary was computed.
    pub computed_at: DateTime<Utc>,
    /// The version of the engine that computed the summary.
    pub engine_version: String,
}
