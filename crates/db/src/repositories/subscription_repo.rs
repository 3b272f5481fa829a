//! Repository for the `subscriptions` table.

use sqlx::PgExecutor;

use super::subscription_scope;
use crate::models::page::PageRequest;
use crate::models::subscription::Subscription;
use crate::store::Ancestor;

const COLUMNS: &str = "\
    guid, plan_guid, customer_guid, amount, started_at, next_transaction_at, \
    period, canceled, canceled_at, created_at, updated_at";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    pub async fn list_by_ancestor<'e, E: PgExecutor<'e>>(
        executor: E,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions \
             WHERE {} \
             ORDER BY created_at DESC, guid \
             LIMIT $2 OFFSET $3",
            subscription_scope(ancestor)
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(ancestor.guid())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_ancestor<'e, E: PgExecutor<'e>>(
        executor: E,
        ancestor: Ancestor<'_>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM subscriptions WHERE {}",
            subscription_scope(ancestor)
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(ancestor.guid())
            .fetch_one(executor)
            .await
    }
}
