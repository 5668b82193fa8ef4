//! Application state for the shift ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::ledger::ShiftLedger;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the shift ledger itself.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<ShiftLedger>,
}

impl AppState {
    /// Creates a new application state around the given ledger.
    pub fn new(ledger: ShiftLedger) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }

    /// Returns a reference to the ledger.
    pub fn ledger(&self) -> &ShiftLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
