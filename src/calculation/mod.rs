//! Calculation logic for the shift ledger.
//!
//! This module contains the pure settlement functions invoked at close
//! time: taximeter reconciliation, salary rule evaluation, and the
//! aggregation of both into the shift's frozen summary.

mod reconcile;
mod report;
mod salary;

pub use reconcile::{Reconciliation, reconcile};
pub use report::summarize;
pub use salary::{apply_bonus, compute_gross, compute_net};
