use std::sync::Arc;

use billy_db::BillingStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the store is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (PostgreSQL or in-memory).
    pub store: Arc<dyn BillingStore>,
}
