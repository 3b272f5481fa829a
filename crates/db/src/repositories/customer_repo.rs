//! Repository for the `customers` table.

use sqlx::PgExecutor;

use super::subscription_scope;
use crate::models::customer::Customer;
use crate::models::page::PageRequest;
use crate::store::Ancestor;

const COLUMNS: &str = "guid, company_guid, external_id, deleted, created_at, updated_at";

pub struct CustomerRepo;

impl CustomerRepo {
    /// Customers of a company, or customers holding a subscription to a plan.
    fn scope(ancestor: Ancestor<'_>) -> String {
        match ancestor {
            Ancestor::Company(_) => "company_guid = $1".to_string(),
            Ancestor::Plan(_) => format!(
                "guid IN (SELECT customer_guid FROM subscriptions WHERE {})",
                subscription_scope(ancestor)
            ),
        }
    }

    pub async fn list_by_ancestor<'e, E: PgExecutor<'e>>(
        executor: E,
        ancestor: Ancestor<'_>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers \
             WHERE {} \
             ORDER BY created_at DESC, guid \
             LIMIT $2 OFFSET $3",
            Self::scope(ancestor)
        );
        sqlx::query_as::<_, Customer>(&query)
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
            "SELECT COUNT(*) FROM customers WHERE {}",
            Self::scope(ancestor)
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(ancestor.guid())
            .fetch_one(executor)
            .await
    }
}
