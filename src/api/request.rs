//! Request types for the shift ledger API.
//!
//! This module defines the JSON request structures for the shift
//! endpoints and their conversions into domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    EndReadings, ExpenseCategory, ExpenseDraft, MeterCounter, MeterReading, PaymentMethod,
    ReadingSlot, TripDraft,
};

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartShiftRequest {
    /// The driver opening the shift (attached by the identity layer).
    pub driver_id: Uuid,
    /// The vehicle used during the shift.
    pub vehicle_id: Uuid,
    /// Dashboard odometer at shift open.
    pub odometer_start: Decimal,
}

/// Request body for `POST /shifts/:id/trips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
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
    /// The amount actually collected.
    pub collected: Decimal,
    /// How the fare was paid.
    pub payment: PaymentMethod,
    /// Optional reference to an account client.
    #[serde(default)]
    pub client_ref: Option<String>,
}

/// Request body for `POST /shifts/:id/expenses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRequest {
    /// What the expense was for.
    pub category: ExpenseCategory,
    /// The amount spent.
    pub amount: Decimal,
    /// How the expense was paid.
    pub payment: PaymentMethod,
    /// When the expense was incurred.
    pub incurred_at: DateTime<Utc>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `POST /shifts/:id/readings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReadingRequest {
    /// The counter the reading belongs to.
    pub counter: MeterCounter,
    /// Whether this is the start or end value.
    pub slot: ReadingSlot,
    /// The observed counter value.
    pub value: Decimal,
}

/// End readings inside a close request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndReadingsRequest {
    /// Dashboard odometer at shift end.
    pub odometer: Decimal,
    /// Taximeter pickup-fee counter at shift end.
    #[serde(default)]
    pub pickup_fee: Option<Decimal>,
    /// Taximeter in-load distance counter at shift end.
    #[serde(default)]
    pub in_load_distance: Option<Decimal>,
    /// Taximeter fare-drops counter at shift end.
    #[serde(default)]
    pub fare_drops: Option<Decimal>,
}

/// Request body for `POST /shifts/:id/close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseShiftRequest {
    /// End readings for the shift's counters.
    pub end_readings: EndReadingsRequest,
    /// Cash amount the driver declares to hand over.
    pub declared_cash: Decimal,
    /// Minutes the driver was interrupted.
    #[serde(default)]
    pub interruption_minutes: i64,
}

/// Request body for `POST /shifts/:id/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateShiftRequest {
    /// The driver's signature token.
    pub signature: String,
}

impl From<TripRequest> for TripDraft {
    fn from(req: TripRequest) -> Self {
        TripDraft {
            pickup_label: req.pickup_label,
            dropoff_label: req.dropoff_label,
            pickup_index: req.pickup_index,
            dropoff_index: req.dropoff_index,
            picked_up_at: req.picked_up_at,
            dropped_off_at: req.dropped_off_at,
            metered_price: req.metered_price,
            collected: req.collected,
            payment: req.payment,
            client_ref: req.client_ref,
        }
    }
}

impl From<ExpenseRequest> for ExpenseDraft {
    fn from(req: ExpenseRequest) -> Self {
        ExpenseDraft {
            category: req.category,
            amount: req.amount,
            payment: req.payment,
            incurred_at: req.incurred_at,
            note: req.note,
        }
    }
}

impl From<MeterReadingRequest> for MeterReading {
    fn from(req: MeterReadingRequest) -> Self {
        MeterReading {
            counter: req.counter,
            slot: req.slot,
            value: req.value,
        }
    }
}

impl From<EndReadingsRequest> for EndReadings {
    fn from(req: EndReadingsRequest) -> Self {
        EndReadings {
            odometer: req.odometer,
            pickup_fee: req.pickup_fee,
            in_load_distance: req.in_load_distance,
            fare_drops: req.fare_drops,
        }
    }
}
