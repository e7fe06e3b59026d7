//! Result reporting route.

use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::report::{ReportRequest, ReportResponse},
    error::AppError,
    services::queue_service,
    state::SharedState,
};

/// Routes for reporting results.
pub fn router() -> Router<SharedState> {
    Router::new().route("/report", post(report_result))
}

/// Report a finished match to the remote bracket.
#[utoipa::path(
    post,
    path = "/report",
    tag = "report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Result recorded; `refresh_error` is set if the queue could not be refreshed afterwards", body = ReportResponse),
        (status = 400, description = "Malformed score or tie"),
        (status = 404, description = "Match not in the queue"),
        (status = 409, description = "Remote bracket rejected the result"),
        (status = 503, description = "Remote bracket unreachable")
    )
)]
pub async fn report_result(
    State(state): State<SharedState>,
    Json(payload): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    payload.validate()?;
    let response = queue_service::report(&state, payload).await?;
    Ok(Json(response))
}
