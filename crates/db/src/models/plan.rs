//! Plan entity and its creation input.

use billy_core::plan::{Frequency, PlanType};
use billy_core::types::{Guid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plan {
    pub guid: Guid,
    /// Owning company. Compared against the caller for authorization.
    pub company_guid: Guid,
    #[sqlx(try_from = "String")]
    pub plan_type: PlanType,
    /// Minor currency units (cents).
    pub amount: i64,
    #[sqlx(try_from = "String")]
    pub frequency: Frequency,
    pub interval: i32,
    /// Soft-delete marker. Plans are never removed.
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for creating a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub company_guid: Guid,
    pub plan_type: PlanType,
    pub amount: i64,
    pub frequency: Frequency,
    pub interval: i32,
}
