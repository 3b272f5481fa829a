use billy_core::types::{Guid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `subscriptions` table: a customer enrolled in a plan.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub guid: Guid,
    pub plan_guid: Guid,
    pub customer_guid: Guid,
    /// Overrides the plan amount when set.
    pub amount: Option<i64>,
    pub started_at: Timestamp,
    pub next_transaction_at: Timestamp,
    /// Number of billing periods already scheduled.
    pub period: i32,
    pub canceled: bool,
    pub canceled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
