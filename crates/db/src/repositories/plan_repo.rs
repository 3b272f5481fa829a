//! Repository for the `plans` table.

use billy_core::guid::{make_guid, PLAN_PREFIX};
use sqlx::PgExecutor;

use crate::models::page::PageRequest;
use crate::models::plan::{CreatePlan, Plan};

// `interval` is a reserved word in PostgreSQL and must stay quoted.
const COLUMNS: &str = "\
    guid, company_guid, plan_type, amount, frequency, \"interval\", \
    deleted, created_at, updated_at";

pub struct PlanRepo;

impl PlanRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreatePlan,
    ) -> Result<Plan, sqlx::Error> {
        let query = format!(
            "INSERT INTO plans (guid, company_guid, plan_type, amount, frequency, \"interval\") \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(make_guid(PLAN_PREFIX))
            .bind(&input.company_guid)
            .bind(input.plan_type.as_str())
            .bind(input.amount)
            .bind(input.frequency.as_str())
            .bind(input.interval)
            .fetch_one(executor)
            .await
    }

    /// Find a plan by guid. Soft-deleted plans are returned too.
    pub async fn find_by_guid<'e, E: PgExecutor<'e>>(
        executor: E,
        guid: &str,
    ) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plans WHERE guid = $1");
        sqlx::query_as::<_, Plan>(&query)
            .bind(guid)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_company<'e, E: PgExecutor<'e>>(
        executor: E,
        company_guid: &str,
        page: PageRequest,
    ) -> Result<Vec<Plan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM plans \
             WHERE company_guid = $1 \
             ORDER BY created_at DESC, guid \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(company_guid)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count_by_company<'e, E: PgExecutor<'e>>(
        executor: E,
        company_guid: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plans WHERE company_guid = $1")
            .bind(company_guid)
            .fetch_one(executor)
            .await
    }

    /// Flip `deleted` to true, but only if it is still false.
    ///
    /// Returns `None` if the plan does not exist or is already deleted.
    pub async fn soft_delete<'e, E: PgExecutor<'e>>(
        executor: E,
        guid: &str,
    ) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!(
            "UPDATE plans SET deleted = TRUE, updated_at = NOW() \
             WHERE guid = $1 AND deleted = FALSE \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(guid)
            .fetch_optional(executor)
            .await
    }
}
