//! Append-only expense registry.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{Expense, ExpenseDraft};

/// Append-only store of expenses recorded against shifts.
///
/// There are no update or delete operations; a wrong entry is corrected by
/// a compensating entry.
#[derive(Debug, Default)]
pub struct ExpenseRegistry {
    inner: RwLock<HashMap<Uuid, Vec<Expense>>>,
}

impl ExpenseRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the draft and appends it to the shift's expense log.
    pub fn append(&self, shift_id: Uuid, draft: ExpenseDraft) -> LedgerResult<Expense> {
        draft.validate()?;
        let mut logs = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let expense = Expense::from_draft(shift_id, draft);
        logs.entry(shift_id).or_default().push(expense.clone());
        Ok(expense)
    }

    /// Returns an ordered snapshot of the shift's expenses.
    pub fn list_for(&self, shift_id: Uuid) -> Vec<Expense> {
        let logs = self.inner.read().unwrap_or_else(|e| e.into_inner());
        logs.get(&shift_id).cloned().unwrap_or_default()
    }
}
