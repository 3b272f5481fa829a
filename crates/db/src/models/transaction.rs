use billy_core::transaction::{TransactionStatus, TransactionType};
use billy_core::types::{Guid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub guid: Guid,
    pub subscription_guid: Guid,
    #[sqlx(try_from = "String")]
    pub transaction_type: TransactionType,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
    pub amount: i64,
    pub scheduled_at: Timestamp,
    pub failure_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
