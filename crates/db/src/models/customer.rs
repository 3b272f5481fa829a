use billy_core::types::{Guid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub guid: Guid,
    pub company_guid: Guid,
    /// Reference to the customer record at the payment processor, if any.
    pub external_id: Option<String>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
