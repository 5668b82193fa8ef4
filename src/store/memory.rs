//! In-memory shift store.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{RuleKind, SalaryRule, Shift, ShiftStatus};
use crate::store::ShiftStore;

#[derive(Debug, Default)]
struct State {
    shifts: HashMap<Uuid, Shift>,
    open_by_driver: HashMap<Uuid, Uuid>,
    rules: HashMap<Uuid, SalaryRule>,
    bonuses: HashMap<Uuid, SalaryRule>,
}

/// [`ShiftStore`] backed by process memory.
///
/// All operations take a single lock, so the uniqueness check inside
/// [`ShiftStore::insert_shift`] and the status comparison inside
/// [`ShiftStore::update_if_status`] are atomic with their writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShiftStore for MemoryStore {
    fn insert_shift(&self, shift: Shift) -> LedgerResult<Shift> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if let Some(open_id) = state.open_by_driver.get(&shift.driver_id) {
            return Err(LedgerError::conflict(format!(
                "driver {} already has an open shift ({open_id})",
                shift.driver_id
            )));
        }
        state.open_by_driver.insert(shift.driver_id, shift.id);
        state.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    fn get(&self, shift_id: Uuid) -> LedgerResult<Shift> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .shifts
            .get(&shift_id)
            .cloned()
            .ok_or(LedgerError::ShiftNotFound { shift_id })
    }

    fn update_if_status(&self, shift: Shift, expected: ShiftStatus) -> LedgerResult<Shift> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let current = state
            .shifts
            .get(&shift.id)
            .ok_or(LedgerError::ShiftNotFound { shift_id: shift.id })?;
        if current.status != expected {
            return Err(LedgerError::conflict(format!(
                "shift {} is {}, expected {expected}",
                shift.id, current.status
            )));
        }
        if expected == ShiftStatus::Open && shift.status != ShiftStatus::Open {
            state.open_by_driver.remove(&shift.driver_id);
        }
        state.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    fn assign_rule(&self, driver_id: Uuid, rule: SalaryRule) -> LedgerResult<()> {
        rule.validate()?;
        if matches!(rule.kind, RuleKind::Bonus { .. }) {
            return Err(LedgerError::validation(
                "kind",
                "a bonus rule cannot be a driver's default rule",
            ));
        }
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.rules.insert(driver_id, rule);
        Ok(())
    }

    fn rule_for_driver(&self, driver_id: Uuid) -> Option<SalaryRule> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.rules.get(&driver_id).cloned()
    }

    fn assign_bonus(&self, driver_id: Uuid, rule: SalaryRule) -> LedgerResult<()> {
        rule.validate()?;
        if !matches!(rule.kind, RuleKind::Bonus { .. }) {
            return Err(LedgerError::validation(
                "kind",
                "only a bonus rule can be layered on the default rule",
            ));
        }
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.bonuses.insert(driver_id, rule);
        Ok(())
    }

    fn bonus_for_driver(&self, driver_id: Uuid) -> Option<SalaryRule> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.bonuses.get(&driver_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn open_shift(driver_id: Uuid) -> Shift {
        Shift::open(driver_id, Uuid::new_v4(), dec("120450"))
    }

    #[test]
    fn test_insert_rejects_second_open_shift_for_driver() {
        let store = MemoryStore::new();
        let driver_id = Uuid::new_v4();

        store.insert_shift(open_shift(driver_id)).unwrap();
        let err = store.insert_shift(open_shift(driver_id)).unwrap_err();
        assert!(matches!(err, LedgerError::Conflict { .. }));
    }

    #[test]
    fn test_insert_allows_new_shift_after_close() {
        let store = MemoryStore::new();
        let driver_id = Uuid::new_v4();

        let mut shift = store.insert_shift(open_shift(driver_id)).unwrap();
        shift.status = ShiftStatus::Closed;
        store.update_if_status(shift, ShiftStatus::Open).unwrap();

        assert!(store.insert_shift(open_shift(driver_id)).is_ok());
    }

    #[test]
    fn test_update_if_status_rejects_stale_expectation() {
        let store = MemoryStore::new();
        let driver_id = Uuid::new_v4();

        let mut shift = store.insert_shift(open_shift(driver_id)).unwrap();
        shift.status = ShiftStatus::Closed;
        store
            .update_if_status(shift.clone(), ShiftStatus::Open)
            .unwrap();

        // A second closer raced us and lost.
        let err = store
            .update_if_status(shift, ShiftStatus::Open)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict { .. }));
    }

    #[test]
    fn test_get_unknown_shift_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::ShiftNotFound { .. }));
    }

    #[test]
    fn test_concurrent_inserts_admit_exactly_one_open_shift() {
        let store = Arc::new(MemoryStore::new());
        let driver_id = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert_shift(open_shift(driver_id)).is_ok())
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
    }

    #[test]
    fn test_bonus_rule_cannot_be_default() {
        let store = MemoryStore::new();
        let driver_id = Uuid::new_v4();
        let bonus = SalaryRule {
            id: Uuid::new_v4(),
            name: "late_notice_cover".to_string(),
            kind: RuleKind::Bonus { amount: dec("25") },
            window: None,
            active: true,
            non_deductible: vec![],
        };

        assert!(store.assign_rule(driver_id, bonus.clone()).is_err());
        assert!(store.assign_bonus(driver_id, bonus).is_ok());
        assert!(store.bonus_for_driver(driver_id).is_some());
    }
}
