//! Application state for the contractor billing API.

use std::sync::Arc;

use crate::service::BillingService;

/// Shared application state.
///
/// Holds the billing service every handler works through.
#[derive(Clone)]
pub struct AppState {
    service: Arc<BillingService>,
}

impl AppState {
    /// Creates a new application state around the given service.
    pub fn new(service: BillingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the billing service.
    pub fn service(&self) -> &BillingService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // axum state must be Clone
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }
}
