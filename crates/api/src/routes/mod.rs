pub mod company;
pub mod health;
pub mod plan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /companies                                   create (public)
///
/// /plans                                       list, create
/// /plans/{plan_guid}                           get, delete
/// /plans/{plan_guid}/customers                 list customers
/// /plans/{plan_guid}/subscriptions             list subscriptions
/// /plans/{plan_guid}/transactions              list transactions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/companies", company::router())
        .nest("/plans", plan::router())
}
