//! Shift lifecycle orchestration.
//!
//! [`ShiftLedger`] is the only component allowed to mutate shift status. It
//! owns the registries, delegates settlement maths to the calculation
//! modules, and pushes every transition through the store's conditional
//! writes so concurrent callers cannot race past an invariant.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{reconcile, summarize};
use crate::config::FleetConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    EndReadings, Expense, ExpenseDraft, MeterReading, SalaryRule, Shift, ShiftStatus,
    ShiftSummary, Trip, TripDraft,
};
use crate::registry::{ExpenseRegistry, TripRegistry};
use crate::store::ShiftStore;

/// The shift state machine: OPEN → CLOSED → VALIDATED.
///
/// All mutating operations are short conditional-write transactions; reads
/// are side-effect-free. Nothing here is retried internally — a caller that
/// is unsure of an outcome re-reads the shift status.
pub struct ShiftLedger {
    store: Arc<dyn ShiftStore>,
    trips: TripRegistry,
    expenses: ExpenseRegistry,
    config: FleetConfig,
}

impl ShiftLedger {
    /// Creates a ledger over the given store and configuration.
    pub fn new(store: Arc<dyn ShiftStore>, config: FleetConfig) -> Self {
        Self {
            store,
            trips: TripRegistry::new(),
            expenses: ExpenseRegistry::new(),
            config,
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &Arc<dyn ShiftStore> {
        &self.store
    }

    /// Opens a new shift for a driver/vehicle pair.
    ///
    /// Fails with `Conflict` when the driver already has an OPEN shift; the
    /// uniqueness check lives in the store, atomic with the insert.
    pub fn start(
        &self,
        driver_id: Uuid,
        vehicle_id: Uuid,
        odometer_start: Decimal,
    ) -> LedgerResult<Shift> {
        if odometer_start < Decimal::ZERO {
            return Err(LedgerError::validation(
                "odometer_start",
                "odometer must not be negative",
            ));
        }
        let shift = self
            .store
            .insert_shift(Shift::open(driver_id, vehicle_id, odometer_start))?;
        info!(
            shift_id = %shift.id,
            driver_id = %driver_id,
            vehicle_id = %vehicle_id,
            "Shift opened"
        );
        Ok(shift)
    }

    /// Appends a trip to an open shift.
    pub fn record_trip(&self, shift_id: Uuid, draft: TripDraft) -> LedgerResult<Trip> {
        let shift = self.store.get(shift_id)?;
        Self::guard_open(&shift, "record trip on")?;
        let trip = self.trips.append(shift.id, draft)?;
        info!(
            shift_id = %shift.id,
            sequence = trip.sequence,
            collected = %trip.collected,
            "Trip recorded"
        );
        Ok(trip)
    }

    /// Appends an expense to an open shift.
    pub fn record_expense(&self, shift_id: Uuid, draft: ExpenseDraft) -> LedgerResult<Expense> {
        let shift = self.store.get(shift_id)?;
        Self::guard_open(&shift, "record expense on")?;
        let expense = self.expenses.append(shift.id, draft)?;
        info!(
            shift_id = %shift.id,
            category = ?expense.category,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Records a single odometer/taximeter reading on an open shift.
    pub fn record_meter_reading(
        &self,
        shift_id: Uuid,
        reading: MeterReading,
    ) -> LedgerResult<Shift> {
        let mut shift = self.store.get(shift_id)?;
        Self::guard_open(&shift, "record reading on")?;
        shift.apply_reading(reading)?;
        self.store.update_if_status(shift, ShiftStatus::Open)
    }

    /// Closes a shift: freezes its totals and transitions it to CLOSED.
    ///
    /// This is the single mutation point for computed totals. A second
    /// close deterministically fails with `Conflict` and leaves the stored
    /// totals untouched.
    pub fn close(
        &self,
        shift_id: Uuid,
        end_readings: EndReadings,
        declared_cash: Decimal,
        interruption_minutes: i64,
    ) -> LedgerResult<ShiftSummary> {
        let mut shift = self.store.get(shift_id)?;
        match shift.status {
            ShiftStatus::Open => {}
            ShiftStatus::Closed => {
                return Err(LedgerError::conflict(format!(
                    "shift {shift_id} is already closed"
                )));
            }
            ShiftStatus::Validated => {
                return Err(LedgerError::conflict(format!(
                    "shift {shift_id} is validated and immutable"
                )));
            }
        }
        if declared_cash < Decimal::ZERO {
            return Err(LedgerError::validation(
                "declared_cash",
                "declared cash must not be negative",
            ));
        }
        if interruption_minutes < 0 {
            return Err(LedgerError::validation(
                "interruption_minutes",
                "interruption must not be negative",
            ));
        }

        shift.apply_end_readings(&end_readings)?;

        let trips = self.trips.list_for(shift.id);
        let expenses = self.expenses.list_for(shift.id);
        let rule = self.rule_for(shift.driver_id);
        let bonus = self.qualifying_bonus(&shift);

        let reconciliation = reconcile(&shift.meters, &trips, self.config.tolerance())?;
        let summary = summarize(
            shift.id,
            &reconciliation,
            &trips,
            &expenses,
            &rule,
            bonus.as_ref(),
            declared_cash,
        )?;

        if let Some(flag) = &summary.reconciliation {
            warn!(
                shift_id = %shift.id,
                discrepancy = %flag.discrepancy,
                tolerance = %flag.tolerance,
                "Revenue discrepancy outside tolerance, shift flagged for audit"
            );
        }

        shift.status = ShiftStatus::Closed;
        shift.ended_at = Some(Utc::now());
        shift.declared_cash = Some(declared_cash);
        shift.interruption_minutes = interruption_minutes;
        shift.rule_snapshot = Some(rule);
        shift.totals = Some(summary.clone());
        self.store.update_if_status(shift, ShiftStatus::Open)?;

        info!(
            shift_id = %shift_id,
            total_revenue = %summary.total_revenue,
            gross_pay = %summary.gross_pay,
            net_pay = %summary.net_pay,
            "Shift closed"
        );
        Ok(summary)
    }

    /// Validates a closed shift with the driver's signature. Terminal.
    pub fn validate(&self, shift_id: Uuid, signature: &str) -> LedgerResult<Shift> {
        let mut shift = self.store.get(shift_id)?;
        match shift.status {
            ShiftStatus::Closed => {}
            ShiftStatus::Open => {
                return Err(LedgerError::InvalidState {
                    shift_id,
                    status: shift.status,
                    operation: "validate".to_string(),
                });
            }
            ShiftStatus::Validated => {
                return Err(LedgerError::conflict(format!(
                    "shift {shift_id} is already validated"
                )));
            }
        }
        if signature.trim().is_empty() {
            return Err(LedgerError::validation(
                "signature",
                "signature must not be empty",
            ));
        }

        shift.signature = Some(signature.to_string());
        shift.status = ShiftStatus::Validated;
        let shift = self.store.update_if_status(shift, ShiftStatus::Closed)?;
        info!(shift_id = %shift_id, "Shift validated");
        Ok(shift)
    }

    /// Returns the shift summary at any status.
    ///
    /// Once a shift is closed this returns the frozen totals verbatim; for
    /// an open shift it computes a live preview with a zero declared cash.
    pub fn summary(&self, shift_id: Uuid) -> LedgerResult<ShiftSummary> {
        let shift = self.store.get(shift_id)?;
        if let Some(totals) = &shift.totals {
            return Ok(totals.clone());
        }
        let trips = self.trips.list_for(shift.id);
        let expenses = self.expenses.list_for(shift.id);
        let rule = self.rule_for(shift.driver_id);
        let bonus = self.qualifying_bonus(&shift);
        let reconciliation = reconcile(&shift.meters, &trips, self.config.tolerance())?;
        summarize(
            shift.id,
            &reconciliation,
            &trips,
            &expenses,
            &rule,
            bonus.as_ref(),
            Decimal::ZERO,
        )
    }

    /// Returns the shift record.
    pub fn get(&self, shift_id: Uuid) -> LedgerResult<Shift> {
        self.store.get(shift_id)
    }

    /// Returns the ordered trip log of a shift.
    pub fn trips_for(&self, shift_id: Uuid) -> Vec<Trip> {
        self.trips.list_for(shift_id)
    }

    /// Returns the ordered expense log of a shift.
    pub fn expenses_for(&self, shift_id: Uuid) -> Vec<Expense> {
        self.expenses.list_for(shift_id)
    }

    fn rule_for(&self, driver_id: Uuid) -> SalaryRule {
        self.store
            .rule_for_driver(driver_id)
            .unwrap_or_else(|| self.config.default_rule().clone())
    }

    fn qualifying_bonus(&self, shift: &Shift) -> Option<SalaryRule> {
        self.store
            .bonus_for_driver(shift.driver_id)
            .filter(|bonus| bonus.applies_at(shift.started_at))
    }

    fn guard_open(shift: &Shift, operation: &str) -> LedgerResult<()> {
        match shift.status {
            ShiftStatus::Open => Ok(()),
            ShiftStatus::Closed => Err(LedgerError::InvalidState {
                shift_id: shift.id,
                status: shift.status,
                operation: operation.to_string(),
            }),
            // A validated shift is immutable by contract, not merely in the
            // wrong state.
            ShiftStatus::Validated => Err(LedgerError::conflict(format!(
                "shift {} is validated and immutable",
                shift.id
            ))),
        }
    }
}
