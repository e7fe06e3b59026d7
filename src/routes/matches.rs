//! Queue refresh and marker toggle routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    dto::matches::{MatchesResponse, ToggleResponse},
    error::AppError,
    services::queue_service,
    state::SharedState,
};

/// Routes exposing the match queue.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", post(refresh_matches))
        .route("/matches/{identifier}/start", post(toggle_match))
}

/// Refresh from the remote bracket and return the queue in call order.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    responses(
        (status = 200, description = "Queue refreshed", body = MatchesResponse),
        (status = 503, description = "Remote bracket unreachable")
    )
)]
pub async fn refresh_matches(
    State(state): State<SharedState>,
) -> Result<Json<MatchesResponse>, AppError> {
    let response = queue_service::refresh(&state).await?;
    Ok(Json(response))
}

/// Toggle the in-progress marker of a queued match.
#[utoipa::path(
    post,
    path = "/matches/{identifier}/start",
    tag = "matches",
    params(("identifier" = String, Path, description = "Match identifier code")),
    responses(
        (status = 200, description = "Marker toggled", body = ToggleResponse),
        (status = 404, description = "Match not in the queue")
    )
)]
pub async fn toggle_match(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response = queue_service::toggle(&state, &identifier).await?;
    Ok(Json(response))
}
