//! DTOs for result reporting.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::{
    matches::MatchesResponse,
    validation::{validate_identifier, validate_score},
};

/// Result report; sending the request is the operator's confirmation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportRequest {
    /// Match identifier code, case-insensitive.
    pub identifier: String,
    /// Score in `player1-player2` order, e.g. `2-1`.
    pub score: String,
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier(&self.identifier) {
            errors.add("identifier", e);
        }
        if let Err(e) = validate_score(&self.score) {
            errors.add("score", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Outcome of an accepted report.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    /// `<winner> beat <loser> <score>` with the score winner-first.
    pub summary: String,
    /// Set when the result was recorded but the follow-up refresh failed;
    /// `queue` is then the previous snapshot without the match's marker.
    pub refresh_error: Option<String>,
    /// Queue after the post-report refresh.
    pub queue: MatchesResponse,
}
