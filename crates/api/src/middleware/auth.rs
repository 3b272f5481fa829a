//! API-key authentication extractor for Axum handlers.
//!
//! Callers identify their company with an API key, passed either as the
//! username of HTTP Basic credentials (password ignored) or as a Bearer
//! token. Only the SHA-256 digest of the key is looked up.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::prelude::*;
use billy_core::api_keys::{extract_prefix, hash_api_key};
use billy_core::error::CoreError;
use billy_db::models::company::Company;

use crate::error::AppError;
use crate::state::AppState;

/// The company that owns the API key presented with the request.
///
/// Use this as the first extractor of any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(AuthCompany(company): AuthCompany) -> AppResult<Json<()>> {
///     tracing::info!(company_guid = %company.guid, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthCompany(pub Company);

impl FromRequestParts<AppState> for AuthCompany {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let api_key = api_key_from_header(header).ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Basic <key:> or Bearer <key>")
        })?;

        let company = state
            .store
            .find_company_by_api_key_hash(&hash_api_key(&api_key))
            .await?;

        match company {
            Some(company) if !company.deleted => Ok(AuthCompany(company)),
            _ => {
                tracing::warn!(
                    key_prefix = extract_prefix(&api_key),
                    "Rejected unknown or deleted API key",
                );
                Err(unauthorized("Invalid API key"))
            }
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the API key out of an `Authorization` header value.
///
/// Returns `None` for unsupported schemes, undecodable Basic credentials,
/// and empty keys.
pub(crate) fn api_key_from_header(value: &str) -> Option<String> {
    let key = if let Some(token) = value.strip_prefix("Bearer ") {
        token.trim().to_string()
    } else if let Some(encoded) = value.strip_prefix("Basic ") {
        let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        match decoded.split_once(':') {
            Some((username, _password)) => username.to_string(),
            None => decoded,
        }
    } else {
        return None;
    };

    (!key.is_empty()).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(credentials: &str) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(credentials))
    }

    #[test]
    fn bearer_token_is_the_key() {
        assert_eq!(api_key_from_header("Bearer abc123").as_deref(), Some("abc123"));
    }

    #[test]
    fn basic_username_is_the_key_and_password_is_ignored() {
        assert_eq!(api_key_from_header(&basic("abc123:")).as_deref(), Some("abc123"));
        assert_eq!(
            api_key_from_header(&basic("abc123:whatever")).as_deref(),
            Some("abc123")
        );
        assert_eq!(api_key_from_header(&basic("abc123")).as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert_eq!(api_key_from_header("Bearer "), None);
        assert_eq!(api_key_from_header(&basic(":secret")), None);
    }

    #[test]
    fn unsupported_scheme_or_garbage_is_rejected() {
        assert_eq!(api_key_from_header("Digest abc"), None);
        assert_eq!(api_key_from_header("Basic !!!not-base64!!!"), None);
        assert_eq!(api_key_from_header("abc123"), None);
    }
}
