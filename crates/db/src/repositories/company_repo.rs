//! Repository for the `companies` table.

use billy_core::guid::{make_guid, COMPANY_PREFIX};
use sqlx::PgExecutor;

use crate::models::company::{Company, CreateCompany};

const COLUMNS: &str = "\
    guid, name, api_key_hash, api_key_prefix, deleted, created_at, updated_at";

pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateCompany,
    ) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (guid, name, api_key_hash, api_key_prefix) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(make_guid(COMPANY_PREFIX))
            .bind(&input.name)
            .bind(&input.api_key_hash)
            .bind(&input.api_key_prefix)
            .fetch_one(executor)
            .await
    }

    /// Find a company by the SHA-256 digest of its API key.
    pub async fn find_by_api_key_hash<'e, E: PgExecutor<'e>>(
        executor: E,
        hash: &str,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE api_key_hash = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(hash)
            .fetch_optional(executor)
            .await
    }
}
