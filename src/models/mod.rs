//! Core data models for the shift ledger.
//!
//! This module contains all the domain models used throughout the engine.

mod expense;
mod salary_rule;
mod shift;
mod summary;
mod trip;

pub use expense::{Expense, ExpenseCategory, ExpenseDraft};
pub use salary_rule::{ApplicabilityWindow, RuleDay, RuleKind, SalaryRule};
pub use shift::{
    CounterPair, EndReadings, MeterCounter, MeterGrid, MeterReading, ReadingSlot, Shift,
    ShiftStatus,
};
pub use summary::{ReconciliationFlag, ShiftSummary};
pub use trip::{PaymentMethod, Trip, TripDraft};
