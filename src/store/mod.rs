//! Persistence boundary for shifts and rule assignments.
//!
//! The ledger never mutates a shift in place: every transition goes through
//! a conditional write that compares the stored status, so concurrent
//! callers race on the store instead of on application-level
//! check-then-act. The one-OPEN-shift-per-driver invariant lives here for
//! the same reason.

mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{SalaryRule, Shift, ShiftStatus};

/// Conditional read/write access to persisted shifts.
///
/// The in-memory implementation backs tests and the development server; a
/// production deployment binds the same trait to a database where
/// [`ShiftStore::insert_shift`] maps to a partial unique index on
/// `(driver_id) WHERE status = 'open'` and
/// [`ShiftStore::update_if_status`] to a conditional `UPDATE ... WHERE
/// status = $expected`.
pub trait ShiftStore: Send + Sync {
    /// Persists a freshly opened shift.
    ///
    /// Fails with `Conflict` when the driver already has an OPEN shift;
    /// the check and the insert are atomic.
    fn insert_shift(&self, shift: Shift) -> LedgerResult<Shift>;

    /// Loads a shift by id. Fails with `ShiftNotFound`.
    fn get(&self, shift_id: Uuid) -> LedgerResult<Shift>;

    /// Replaces the stored shift only if its current status matches
    /// `expected`. Fails with `Conflict` otherwise.
    fn update_if_status(&self, shift: Shift, expected: ShiftStatus) -> LedgerResult<Shift>;

    /// Assigns the driver's default salary rule.
    fn assign_rule(&self, driver_id: Uuid, rule: SalaryRule) -> LedgerResult<()>;

    /// Returns the driver's default salary rule, if assigned.
    fn rule_for_driver(&self, driver_id: Uuid) -> Option<SalaryRule>;

    /// Assigns a bonus rule layered on the driver's default rule.
    fn assign_bonus(&self, driver_id: Uuid, rule: SalaryRule) -> LedgerResult<()>;

    /// Returns the driver's bonus rule, if assigned.
    fn bonus_for_driver(&self, driver_id: Uuid) -> Option<SalaryRule>;
}
