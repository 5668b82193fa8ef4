//! HTTP API module for the shift ledger.
//!
//! This module provides the REST endpoints for opening, operating, closing
//! and validating shifts. Transport authentication is handled upstream by
//! the identity layer; the endpoints receive the driver and vehicle ids it
//! attaches.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CloseShiftRequest, EndReadingsRequest, ExpenseRequest, MeterReadingRequest,
    StartShiftRequest, TripRequest, ValidateShiftRequest,
};
pub use response::ApiError;
pub use state::AppState;
