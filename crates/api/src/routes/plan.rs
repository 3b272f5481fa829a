use axum::routing::get;
use axum::Router;
use billy_db::models::customer::Customer;
use billy_db::models::subscription::Subscription;
use billy_db::models::transaction::Transaction;

use crate::handlers::plan;
use crate::state::AppState;

/// Routes mounted at `/plans`.
///
/// ```text
/// GET    /                              list
/// POST   /                              create
/// GET    /{plan_guid}                   get_by_guid
/// DELETE /{plan_guid}                   delete
/// GET    /{plan_guid}/customers         list_children::<Customer>
/// GET    /{plan_guid}/subscriptions     list_children::<Subscription>
/// GET    /{plan_guid}/transactions      list_children::<Transaction>
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plan::list).post(plan::create))
        .route("/{plan_guid}", get(plan::get_by_guid).delete(plan::delete))
        .route(
            "/{plan_guid}/customers",
            get(plan::list_children::<Customer>),
        )
        .route(
            "/{plan_guid}/subscriptions",
            get(plan::list_children::<Subscription>),
        )
        .route(
            "/{plan_guid}/transactions",
            get(plan::list_children::<Transaction>),
        )
}
