//! Append-only trip registry.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{Trip, TripDraft};

/// Append-only store of trips recorded against shifts.
///
/// Sequence numbers are assigned on append and are monotonic within a
/// shift. There are no update or delete operations.
#[derive(Debug, Default)]
pub struct TripRegistry {
    inner: RwLock<HashMap<Uuid, Vec<Trip>>>,
}

impl TripRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the draft and appends it to the shift's trip log.
    ///
    /// Returns the stored trip with its assigned id and sequence number.
    pub fn append(&self, shift_id: Uuid, draft: TripDraft) -> LedgerResult<Trip> {
        draft.validate()?;
        // Appends are single pushes, so a poisoned lock still holds
        // consistent data.
        let mut logs = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let log = logs.entry(shift_id).or_default();
        let sequence = log.len() as u32 + 1;
        let trip = Trip::from_draft(shift_id, sequence, draft);
        log.push(trip.clone());
        Ok(trip)
    }

    /// Returns an ordered snapshot of the shift's trips.
    pub fn list_for(&self, shift_id: Uuid) -> Vec<Trip> {
        let logs = self.inner.read().unwrap_or_else(|e| e.into_inner());
        logs.get(&shift_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn draft(collected: &str) -> TripDraft {
        TripDraft {
            pickup_label: "Bastille".to_string(),
            dropoff_label: "Opéra".to_string(),
            pickup_index: dec("100"),
            dropoff_index: dec("104"),
            picked_up_at: Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap(),
            dropped_off_at: Utc.with_ymd_and_hms(2026, 3, 14, 10, 15, 0).unwrap(),
            metered_price: dec(collected),
            collected: dec(collected),
            payment: PaymentMethod::Cash,
            client_ref: None,
        }
    }

    #[test]
    fn test_append_assigns_monotonic_sequence() {
        let registry = TripRegistry::new();
        let shift_id = Uuid::new_v4();

        let first = registry.append(shift_id, draft("12.50")).unwrap();
        let second = registry.append(shift_id, draft("8.00")).unwrap();

        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
    }

    #[test]
    fn test_sequences_are_per_shift() {
        let registry = TripRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.append(a, draft("12.50")).unwrap();
        let on_b = registry.append(b, draft("8.00")).unwrap();

        assert_eq!(on_b.sequence, 1);
    }

    #[test]
    fn test_list_for_returns_insertion_order() {
        let registry = TripRegistry::new();
        let shift_id = Uuid::new_v4();
        registry.append(shift_id, draft("12.50")).unwrap();
        registry.append(shift_id, draft("8.00")).unwrap();
        registry.append(shift_id, draft("21.00")).unwrap();

        let trips = registry.list_for(shift_id);
        let sequences: Vec<u32> = trips.iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_draft_is_not_stored() {
        let registry = TripRegistry::new();
        let shift_id = Uuid::new_v4();
        let mut bad = draft("12.50");
        bad.collected = dec("-1");

        assert!(registry.append(shift_id, bad).is_err());
        assert!(registry.list_for(shift_id).is_empty());
    }

    #[test]
    fn test_list_for_unknown_shift_is_empty() {
        let registry = TripRegistry::new();
        assert!(registry.list_for(Uuid::new_v4()).is_empty());
    }
}
