//! Health check payload.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "complete" once no open matches remain).
    pub status: String,
    /// Matches currently waiting in the queue.
    pub open_matches: usize,
}

impl HealthResponse {
    /// Create a health response for a bracket that still has matches to call.
    pub fn ok(open_matches: usize) -> Self {
        Self {
            status: "ok".to_string(),
            open_matches,
        }
    }

    /// Create a health response for a bracket with nothing left to play.
    pub fn complete() -> Self {
        Self {
            status: "complete".to_string(),
            open_matches: 0,
        }
    }
}
