use crate::{dto::health::HealthResponse, state::SharedState};

/// Report the queue size of the shared session without contacting the remote.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let session = state.session().await;
    if session.is_complete() {
        HealthResponse::complete()
    } else {
        HealthResponse::ok(session.queue().len())
    }
}
