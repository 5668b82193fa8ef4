//! Expense model and related types.
//!
//! This module defines the Expense struct for one outlay charged against a
//! shift, plus the draft type used when appending a new expense.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::PaymentMethod;

/// Category of an expense charged against a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Fuel for the vehicle.
    Fuel,
    /// Motorway and bridge tolls.
    Toll,
    /// Vehicle wash.
    Wash,
    /// Maintenance or small repairs.
    Maintenance,
    /// Anything else.
    Other,
}

/// Input for appending an expense to an open shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// What the expense was for.
    pub category: ExpenseCategory,
    /// The amount spent. Must be strictly positive.
    pub amount: Decimal,
    /// How the expense was paid.
    pub payment: PaymentMethod,
    /// When the expense was incurred.
    pub incurred_at: DateTime<Utc>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl ExpenseDraft {
    /// Validates the draft against the expense invariants.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                "amount",
                "expense amount must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// One outlay charged against a shift.
///
/// Expenses are append-only; a wrong entry is corrected by a compensating
/// entry, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense.
    pub id: Uuid,
    /// The shift the expense belongs to.
    pub shift_id: Uuid,
    /// What the expense was for.
    pub category: ExpenseCategory,
    /// The amount spent.
    pub amount: Decimal,
    /// How the expense was paid.
    pub payment: PaymentMethod,
    /// When the expense was incurred.
    pub incurred_at: DateTime<Utc>,
    /// Optional free-text note.
    pub note: Option<String>,
}

impl Expense {
    /// Builds an expense from a validated draft.
    pub fn from_draft(shift_id: Uuid, draft: ExpenseDraft) -> Self {
        Expense {
            id: Uuid::new_v4(),
            shift_id,
            category: draft.category,
            amount: draft.amount,
            payment: draft.payment,
            incurred_at: draft.incurred_at,
            note: draft.note,
        }
    }
}
