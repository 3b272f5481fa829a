//! Company bootstrap.
//!
//! The plaintext API key is returned **only** on creation; afterwards only
//! `api_key_prefix` identifies it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use billy_core::api_keys::generate_api_key;
use billy_db::models::company::{CompanyCreatedResponse, CreateCompany};

use crate::error::AppResult;
use crate::forms::CompanyCreateForm;
use crate::handlers::json_body;
use crate::state::AppState;

/// POST /api/v1/companies
///
/// Public. Creates a company and issues its API key.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CompanyCreateForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CompanyCreatedResponse>)> {
    let name = json_body(payload)?.into_name()?;
    let generated = generate_api_key();

    let mut uow = state.store.begin().await?;
    let company = uow
        .create_company(&CreateCompany {
            name,
            api_key_hash: generated.hash,
            api_key_prefix: generated.prefix,
        })
        .await?;
    uow.commit().await?;

    tracing::info!(
        company_guid = %company.guid,
        key_prefix = %company.api_key_prefix,
        "Company created",
    );

    Ok((
        StatusCode::CREATED,
        Json(CompanyCreatedResponse {
            company,
            api_key: generated.plaintext,
        }),
    ))
}
