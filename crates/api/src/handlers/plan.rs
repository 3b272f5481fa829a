//! Handlers for the `/plans` resource.
//!
//! Every plan-scoped route goes through [`get_and_check_plan`] so that a
//! company can only ever see or touch its own plans.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use billy_core::error::CoreError;
use billy_db::models::company::Company;
use billy_db::models::page::Page;
use billy_db::models::plan::Plan;
use billy_db::{list_by_ancestor, Ancestor, BillingStore, ListByAncestor};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::forms::PlanCreateForm;
use crate::handlers::{json_body, query_params};
use crate::middleware::auth::AuthCompany;
use crate::query::PaginationParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a plan and make sure `company` owns it.
///
/// Soft-deleted plans are returned as well; callers decide what that means.
pub async fn get_and_check_plan(
    store: &dyn BillingStore,
    guid: &str,
    company: &Company,
) -> AppResult<Plan> {
    let plan = store
        .find_plan(guid)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Plan",
            id: guid.to_string(),
        })?;

    if plan.company_guid != company.guid {
        return Err(CoreError::Forbidden(format!(
            "You have no permission to access plan {guid}"
        ))
        .into());
    }

    Ok(plan)
}

fn already_deleted(guid: &str) -> AppError {
    AppError::BadRequest(format!("Plan {guid} was already deleted"))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/plans
pub async fn list(
    AuthCompany(company): AuthCompany,
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<Page<Plan>>> {
    let page = query_params(params)?.page();
    let page = list_by_ancestor::<Plan>(state.store.as_ref(), Ancestor::Company(&company), page)
        .await?;
    Ok(Json(page))
}

/// POST /api/v1/plans
///
/// `interval` defaults to 1 when omitted.
pub async fn create(
    AuthCompany(company): AuthCompany,
    State(state): State<AppState>,
    payload: Result<Json<PlanCreateForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Plan>)> {
    let form = json_body(payload)?;
    let input = form.into_create_plan(company.guid.clone())?;

    let mut uow = state.store.begin().await?;
    let plan = uow.create_plan(&input).await?;
    uow.commit().await?;

    tracing::info!(
        plan_guid = %plan.guid,
        company_guid = %company.guid,
        plan_type = %plan.plan_type,
        amount = plan.amount,
        frequency = %plan.frequency,
        interval = plan.interval,
        "Plan created",
    );

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/plans/{plan_guid}
pub async fn get_by_guid(
    AuthCompany(company): AuthCompany,
    State(state): State<AppState>,
    Path(plan_guid): Path<String>,
) -> AppResult<Json<Plan>> {
    let plan = get_and_check_plan(state.store.as_ref(), &plan_guid, &company).await?;
    Ok(Json(plan))
}

/// DELETE /api/v1/plans/{plan_guid}
///
/// Soft delete. A plan can be deleted once; later attempts are a 400.
pub async fn delete(
    AuthCompany(company): AuthCompany,
    State(state): State<AppState>,
    Path(plan_guid): Path<String>,
) -> AppResult<Json<Plan>> {
    let plan = get_and_check_plan(state.store.as_ref(), &plan_guid, &company).await?;
    if plan.deleted {
        return Err(already_deleted(&plan.guid));
    }

    let mut uow = state.store.begin().await?;
    // None means a concurrent delete flipped the flag first.
    let deleted = uow
        .delete_plan(&plan.guid)
        .await?
        .ok_or_else(|| already_deleted(&plan.guid))?;
    uow.commit().await?;

    tracing::info!(
        plan_guid = %deleted.guid,
        company_guid = %company.guid,
        "Plan deleted",
    );

    Ok(Json(deleted))
}

/// GET /api/v1/plans/{plan_guid}/customers
/// GET /api/v1/plans/{plan_guid}/subscriptions
/// GET /api/v1/plans/{plan_guid}/transactions
///
/// Mounted once per child entity type.
pub async fn list_children<T>(
    AuthCompany(company): AuthCompany,
    State(state): State<AppState>,
    Path(plan_guid): Path<String>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<Page<T>>>
where
    T: ListByAncestor + Serialize + 'static,
{
    let page = query_params(params)?.page();
    let plan = get_and_check_plan(state.store.as_ref(), &plan_guid, &company).await?;
    let page = list_by_ancestor::<T>(state.store.as_ref(), Ancestor::Plan(&plan), page).await?;
    Ok(Json(page))
}
