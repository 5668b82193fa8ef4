//! Shift model and related types.
//!
//! This module defines the Shift struct, its lifecycle status, and the
//! odometer/taximeter counter pairs recorded against a work period.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{SalaryRule, ShiftSummary};

/// Lifecycle status of a shift.
///
/// Transitions are one-directional: `Open` → `Closed` → `Validated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// The shift is in progress; trips, expenses and readings may be recorded.
    Open,
    /// The shift has ended and its totals are frozen.
    Closed,
    /// The driver has signed off on the frozen totals. Terminal.
    Validated,
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Closed => "closed",
            ShiftStatus::Validated => "validated",
        };
        f.write_str(s)
    }
}

/// One of the four counters bracketing a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterCounter {
    /// Dashboard odometer, in kilometres.
    Odometer,
    /// Taximeter pickup-fee counter.
    PickupFee,
    /// Taximeter in-load distance counter.
    InLoadDistance,
    /// Taximeter fare-drops counter.
    FareDrops,
}

/// Which end of a counter pair a reading writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSlot {
    /// The value observed when the shift opened.
    Start,
    /// The value observed when the shift ended.
    End,
}

/// A single odometer/taximeter reading to record against a shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// The counter the reading belongs to.
    pub counter: MeterCounter,
    /// Whether this is the start or end value of the counter.
    pub slot: ReadingSlot,
    /// The observed counter value.
    pub value: Decimal,
}

/// Start/end bracket of one counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterPair {
    /// Value observed at shift open, if recorded.
    pub start: Option<Decimal>,
    /// Value observed at shift close, if recorded.
    pub end: Option<Decimal>,
}

impl CounterPair {
    /// Returns `end - start` when both values are recorded, zero otherwise.
    pub fn delta(&self) -> Decimal {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end - start,
            _ => Decimal::ZERO,
        }
    }
}

/// The four counter pairs recorded for a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterGrid {
    /// Dashboard odometer bracket.
    pub odometer: CounterPair,
    /// Taximeter pickup-fee bracket.
    pub pickup_fee: CounterPair,
    /// Taximeter in-load distance bracket.
    pub in_load_distance: CounterPair,
    /// Taximeter fare-drops bracket.
    pub fare_drops: CounterPair,
}

impl MeterGrid {
    /// Returns the counter pair for the given counter.
    pub fn pair(&self, counter: MeterCounter) -> &CounterPair {
        match counter {
            MeterCounter::Odometer => &self.odometer,
            MeterCounter::PickupFee => &self.pickup_fee,
            MeterCounter::InLoadDistance => &self.in_load_distance,
            MeterCounter::FareDrops => &self.fare_drops,
        }
    }

    fn pair_mut(&mut self, counter: MeterCounter) -> &mut CounterPair {
        match counter {
            MeterCounter::Odometer => &mut self.odometer,
            MeterCounter::PickupFee => &mut self.pickup_fee,
            MeterCounter::InLoadDistance => &mut self.in_load_distance,
            MeterCounter::FareDrops => &mut self.fare_drops,
        }
    }
}

/// End readings supplied when closing a shift.
///
/// The odometer end is mandatory; taximeter ends may be omitted only for
/// counters whose start was never recorded (their delta is then zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndReadings {
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

/// One work period for one driver/vehicle pair.
///
/// A shift is created in `Open` status, accumulates trips, expenses and
/// meter readings, is closed with frozen totals, and is finally validated
/// with the driver's signature. It is never deleted, only superseded by a
/// new shift once closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The driver working the shift.
    pub driver_id: Uuid,
    /// The vehicle used during the shift.
    pub vehicle_id: Uuid,
    /// Current lifecycle status.
    pub status: ShiftStatus,
    /// When the shift was opened.
    pub started_at: DateTime<Utc>,
    /// When the shift was closed. `None` while open.
    pub ended_at: Option<DateTime<Utc>>,
    /// Odometer and taximeter counter brackets.
    pub meters: MeterGrid,
    /// Minutes the driver was interrupted (breaks, breakdowns). Set at close.
    pub interruption_minutes: i64,
    /// Cash amount the driver declared at close.
    pub declared_cash: Option<Decimal>,
    /// The salary rule the shift was settled against, captured at close so
    /// later rule changes never alter historical pay.
    pub rule_snapshot: Option<SalaryRule>,
    /// Frozen totals computed at close. Immutable once written.
    pub totals: Option<ShiftSummary>,
    /// Signature token written at validation. Immutable once written.
    pub signature: Option<String>,
}

impl Shift {
    /// Opens a new shift for a driver/vehicle pair.
    ///
    /// The odometer start is the only reading known at open time; the
    /// taximeter brackets are recorded separately.
    pub fn open(driver_id: Uuid, vehicle_id: Uuid, odometer_start: Decimal) -> Self {
        Shift {
            id: Uuid::new_v4(),
            driver_id,
            vehicle_id,
            status: ShiftStatus::Open,
            started_at: Utc::now(),
            ended_at: None,
            meters: MeterGrid {
                odometer: CounterPair {
                    start: Some(odometer_start),
                    end: None,
                },
                ..MeterGrid::default()
            },
            interruption_minutes: 0,
            declared_cash: None,
            rule_snapshot: None,
            totals: None,
            signature: None,
        }
    }

    /// Returns true while the shift accepts trips, expenses and readings.
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Open
    }

    /// Records a single meter reading.
    ///
    /// Start slots are write-once; end slots are write-once, require the
    /// corresponding start slot to exist, and must not regress below it.
    pub fn apply_reading(&mut self, reading: MeterReading) -> LedgerResult<()> {
        let field = format!("{:?}.{:?}", reading.counter, reading.slot).to_lowercase();
        let pair = self.meters.pair_mut(reading.counter);
        match reading.slot {
            ReadingSlot::Start => {
                if pair.start.is_some() {
                    return Err(LedgerError::validation(field, "start reading already set"));
                }
                pair.start = Some(reading.value);
            }
            ReadingSlot::End => {
                let Some(start) = pair.start else {
                    return Err(LedgerError::validation(
                        field,
                        "end reading requires a start reading",
                    ));
                };
                if pair.end.is_some() {
                    return Err(LedgerError::validation(field, "end reading already set"));
                }
                if reading.value < start {
                    return Err(LedgerError::validation(
                        field,
                        format!("end reading {} below start {}", reading.value, start),
                    ));
                }
                pair.end = Some(reading.value);
            }
        }
        Ok(())
    }

    /// Writes the end readings supplied at close into the meter grid.
    ///
    /// Each end value must be ≥ its start; an end value for a counter whose
    /// start was never recorded is rejected. Ends already recorded through
    /// [`Shift::apply_reading`] are kept; a conflicting close value fails.
    pub fn apply_end_readings(&mut self, readings: &EndReadings) -> LedgerResult<()> {
        let slots = [
            (MeterCounter::Odometer, Some(readings.odometer)),
            (MeterCounter::PickupFee, readings.pickup_fee),
            (MeterCounter::InLoadDistance, readings.in_load_distance),
            (MeterCounter::FareDrops, readings.fare_drops),
        ];
        for (counter, value) in slots {
            let Some(value) = value else {
                let pair = self.meters.pair(counter);
                if pair.start.is_some() && pair.end.is_none() {
                    return Err(LedgerError::validation(
                        format!("{counter:?}.end").to_lowercase(),
                        "end reading missing for a started counter",
                    ));
                }
                continue;
            };
            let pair = self.meters.pair(counter);
            if pair.end == Some(value) {
                continue;
            }
            self.apply_reading(MeterReading {
                counter,
                slot: ReadingSlot::End,
                value,
            })?;
        }
        Ok(())
    }
}
