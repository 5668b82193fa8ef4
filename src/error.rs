//! Error types for the shift ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while operating a shift.

use thiserror::Error;
use uuid::Uuid;

use crate::models::ShiftStatus;

/// The main error type for the shift ledger.
///
/// All operations in the ledger return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use shift_ledger::error::LedgerError;
///
/// let error = LedgerError::Validation {
///     field: "amount".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'amount': must be greater than zero");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input was malformed or out of range. Recoverable by caller correction.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An operation was attempted against a shift in the wrong lifecycle state.
    #[error("Cannot {operation} shift {shift_id} in status {status}")]
    InvalidState {
        /// The shift the operation targeted.
        shift_id: Uuid,
        /// The status the shift was in when the operation was attempted.
        status: ShiftStatus,
        /// The operation that was rejected.
        operation: String,
    },

    /// The operation would violate a uniqueness or immutability invariant.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the violated invariant.
        message: String,
    },

    /// No shift exists with the given identifier.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The identifier that was not found.
        shift_id: Uuid,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl LedgerError {
    /// Shorthand for a [`LedgerError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`LedgerError::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        LedgerError::Conflict {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
