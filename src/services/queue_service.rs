use tracing::info;

use crate::{
    dto::{
        matches::{MatchesResponse, ToggleResponse},
        report::{ReportRequest, ReportResponse},
    },
    error::ServiceError,
    state::{ReportOutcome, SharedState},
};

/// Refresh from the remote bracket and return the new queue.
pub async fn refresh(state: &SharedState) -> Result<MatchesResponse, ServiceError> {
    let mut session = state.session().await;
    session.refresh().await?;
    Ok(MatchesResponse::from_session(&session))
}

/// Flip a queued match's in-progress marker.
pub async fn toggle(state: &SharedState, identifier: &str) -> Result<ToggleResponse, ServiceError> {
    let identifier = identifier.to_uppercase();
    let mut session = state.session().await;
    let in_progress = session.toggle(&identifier)?;
    Ok(ToggleResponse {
        identifier,
        in_progress,
    })
}

/// Submit a result and return the refreshed queue.
///
/// Unlike the console there is no interactive prompt: the request itself is
/// the confirmation. A refresh failure after the result was accepted still
/// succeeds, with the previous queue and `refresh_error` set.
pub async fn report(
    state: &SharedState,
    request: ReportRequest,
) -> Result<ReportResponse, ServiceError> {
    let identifier = request.identifier.to_uppercase();
    let mut session = state.session().await;

    let plan = session.plan_report(&identifier, &request.score)?;
    let refresh_error = match session.report(&plan).await? {
        ReportOutcome::Refreshed(_) => None,
        ReportOutcome::Stale(err) => Some(err.to_string()),
    };
    info!(%identifier, stale = refresh_error.is_some(), "result reported over HTTP");

    Ok(ReportResponse {
        summary: plan
            .confirmation_question()
            .trim_end_matches('?')
            .to_string(),
        refresh_error,
        queue: MatchesResponse::from_session(&session),
    })
}
