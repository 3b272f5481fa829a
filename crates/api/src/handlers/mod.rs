pub mod company;
pub mod plan;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON body, turning axum's rejection into a JSON 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap query parameters, turning axum's rejection into a JSON 400.
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
