//! Company entity: the root authorization scope.

use billy_core::types::{Guid, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `companies` table.
///
/// `api_key_hash` is never serialized; `api_key_prefix` identifies the key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub guid: Guid,
    pub name: String,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub api_key_prefix: String,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a company. The key material is generated by the caller.
#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub api_key_hash: String,
    pub api_key_prefix: String,
}

/// Response returned once, at company creation, carrying the plaintext key.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyCreatedResponse {
    #[serde(flatten)]
    pub company: Company,
    pub api_key: String,
}
