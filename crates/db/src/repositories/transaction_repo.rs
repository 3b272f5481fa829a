//! Repository for the `transactions` table.

use sqlx::PgExecutor;

use super::subscription_scope;
use crate::models::page::PageRequest;
use crate::models::transaction::Transaction;
use crate::store::Ancestor;

const COLUMNS: &str = "\
    guid, subscription_guid, transaction_type, status, amount, scheduled_at, \
    failure_count, created_at, updated_at";

pub struct TransactionRepo;

impl TransactionRepo {
    fn scope(ancestor: Ancestor<'_>) -> String {
        format!(
            "subscription_guid IN (SELECT guid FROM subscriptions WHERE {})",
            subscription_scope(ancestor)
        )
    }

    pub async fn list_by_ancestor<'e, E: PgExecutor<'e>>(
        executor: E,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE {} \
             ORDER BY created_at DESC, guid \
             LIMIT $2 OFFSET $3",
            Self::scope(ancestor)
        );
        sqlx::query_as::<_, Transaction>(&query)
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
            "SELECT COUNT(*) FROM transactions WHERE {}",
            Self::scope(ancestor)
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(ancestor.guid())
            .fetch_one(executor)
            .await
    }
}
