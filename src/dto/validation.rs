//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::services::report_service::{REPORT_USAGE, ReportError, Score};

const MAX_IDENTIFIER_LENGTH: usize = 8;

/// Validates that an identifier code is a short alphanumeric token.
pub fn validate_identifier(identifier: &str) -> Result<(), ValidationError> {
    let length = identifier.chars().count();
    if length == 0 || length > MAX_IDENTIFIER_LENGTH {
        let mut err = ValidationError::new("identifier_length");
        err.message = Some(
            format!("Identifier must be 1 to {MAX_IDENTIFIER_LENGTH} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    if !identifier.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("identifier_format");
        err.message = Some("Identifier must contain only letters and digits".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a score reads `<digits>-<digits>`.
pub fn validate_score(score: &str) -> Result<(), ValidationError> {
    Score::parse(score).map(|_| ()).map_err(|report_err| match report_err {
        ReportError::ScoreTooLarge(_) => {
            let mut err = ValidationError::new("score_range");
            err.message = Some(report_err.to_string().into());
            err
        }
        _ => {
            let mut err = ValidationError::new("score_format");
            err.message = Some(format!("Score must follow `{REPORT_USAGE}`").into());
            err
        }
    })
}
