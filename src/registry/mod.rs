//! Append-only registries for trips and expenses.
//!
//! Both registries are arena-style logs keyed by shift: records are
//! validated, stamped and pushed, never updated or deleted. Corrections are
//! modeled as compensating entries so the trail stays auditable.

mod expenses;
mod trips;

pub use expenses::ExpenseRegistry;
pub use trips::TripRegistry;
