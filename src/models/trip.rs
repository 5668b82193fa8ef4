//! Trip model and related types.
//!
//! This module defines the Trip struct for one completed fare within a
//! shift, plus the draft type used when appending a new trip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};

/// How an amount was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid in cash to the driver.
    Cash,
    /// Paid by card through the in-vehicle terminal.
    Card,
    /// Invoiced to a client account.
    Account,
    /// Paid with a prepaid voucher.
    Voucher,
}

/// Input for appending a trip to an open shift.
///
/// The registry assigns the identifier and sequence number on append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    /// Label of the pickup location.
    pub pickup_label: String,
    /// Label of the drop-off location.
    pub dropoff_label: String,
    /// Odometer index at pickup.
    pub pickup_index: Decimal,
    /// Odometer index at drop-off.
    pub dropoff_index: Decimal,
    /// When the passenger was picked up.
    pub picked_up_at: DateTime<Utc>,
    /// When the passenger was dropped off.
    pub dropped_off_at: DateTime<Utc>,
    /// The price shown on the meter.
    pub metered_price: Decimal,
    /// The amount actually collected from the passenger.
    pub collected: Decimal,
    /// How the fare was paid.
    pub payment: PaymentMethod,
    /// Optional reference to an account client.
    #[serde(default)]
    pub client_ref: Option<String>,
}

impl TripDraft {
    /// Validates the draft against the trip invariants.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.dropoff_index < self.pickup_index {
            return Err(LedgerError::validation(
                "dropoff_index",
                format!(
                    "drop-off index {} below pickup index {}",
                    self.dropoff_index, self.pickup_index
                ),
            ));
        }
        if self.collected < Decimal::ZERO {
            return Err(LedgerError::validation(
                "collected",
                "collected amount must not be negative",
            ));
        }
        if self.metered_price < Decimal::ZERO {
            return Err(LedgerError::validation(
                "metered_price",
                "metered price must not be negative",
            ));
        }
        if self.dropped_off_at < self.picked_up_at {
            return Err(LedgerError::validation(
                "dropped_off_at",
                "drop-off time before pickup time",
            ));
        }
        Ok(())
    }
}

/// One completed fare within a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier for the trip.
    pub id: Uuid,
    /// The shift the trip belongs to.
    pub shift_id: Uuid,
    /// Monotonic sequence number within the shift.
    pub sequence: u32,
    /// Label of the pickup location.
    pub pickup_label: String,
    /// Label of the drop-off location.
    pub dropoff_label: String,
    /// Odometer index at pickup.
    pub pickup_index: Decimal,
    /// Odometer index at drop-off.
    pub dropoff_index: Decimal,
    /// When the passenger was picked up.
    pub picked_up_at: DateTime<Utc>,
    /// When the passenger was dropped off.
    pub dropped_off_at: DateTime<Utc>,
    /// The price shown on the meter.
    pub metered_price: Decimal,
    /// The amount actually collected from the passenger.
    pub collected: Decimal,
    /// How the fare was paid.
    pub payment: PaymentMethod,
    /// Optional reference to an account client.
    pub client_ref: Option<String>,
}

impl Trip {
    /// Builds a trip from a validated draft.
    pub fn from_draft(shift_id: Uuid, sequence: u32, draft: TripDraft) -> Self {
        Trip {
            id: Uuid::new_v4(),
            shift_id,
            sequence,
            pickup_label: draft.pickup_label,
            dropoff_label: draft.dropoff_label,
            pickup_index: draft.pickup_index,
            dropoff_index: draft.dropoff_index,
            picked_up_at: draft.picked_up_at,
            dropped_off_at: draft.dropped_off_at,
            metered_price: draft.metered_price,
            collected: draft.collected,
            payment: draft.payment,
            client_ref: draft.client_ref,
        }
    }

    /// Distance covered while in load, per the odometer indexes.
    pub fn distance(&self) -> Decimal {
        self.dropoff_index - self.pickup_index
    }
}
