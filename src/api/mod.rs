//! HTTP API module for the contractor billing engine.
//!
//! This module provides the REST endpoints for contractors, billing records
//! and monthly reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    NewBillingRequest, NewContractorRequest, ReportQuery, UpdateTermsRequest,
    UpdateWorkedHoursRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
