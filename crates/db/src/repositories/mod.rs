//! SQL repositories, one per table.
//!
//! Every method is generic over [`sqlx::PgExecutor`] so it runs equally on
//! the pool and inside an open transaction.

pub mod company_repo;
pub mod customer_repo;
pub mod plan_repo;
pub mod subscription_repo;
pub mod transaction_repo;

pub use company_repo::CompanyRepo;
pub use customer_repo::CustomerRepo;
pub use plan_repo::PlanRepo;
pub use subscription_repo::SubscriptionRepo;
pub use transaction_repo::TransactionRepo;

use crate::store::Ancestor;

/// Filter on `subscriptions` rows belonging to an ancestor, with `$1` bound
/// to the ancestor guid. A company ancestor covers all of its plans.
pub(crate) fn subscription_scope(ancestor: Ancestor<'_>) -> &'static str {
    match ancestor {
        Ancestor::Plan(_) => "plan_guid = $1",
        Ancestor::Company(_) => "plan_guid IN (SELECT guid FROM plans WHERE company_guid = $1)",
    }
}
