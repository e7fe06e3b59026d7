//! Error types raised by the Challonge backend.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::bracket::RemoteError;

/// Convenient result alias returning [`ChallongeError`] failures.
pub type ChallongeResult<T> = Result<T, ChallongeError>;

/// Failures that can occur while talking to Challonge.
#[derive(Debug, Error)]
pub enum ChallongeError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build Challonge client")]
    ClientBuilder {
        /// Underlying builder failure.
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send Challonge request to `{path}`")]
    RequestSend {
        /// Request path relative to the tournament.
        path: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// Challonge refused our credentials.
    #[error("Challonge refused credentials ({status}) for `{path}`")]
    Unauthorized {
        /// Request path relative to the tournament.
        path: String,
        /// 401 or 403.
        status: StatusCode,
    },
    /// Challonge rejected the request content.
    #[error("Challonge rejected `{path}` ({status}): {}", .messages.join("; "))]
    Rejected {
        /// Request path relative to the tournament.
        path: String,
        /// Client error status other than 401/403.
        status: StatusCode,
        /// Messages from Challonge's `errors` list, possibly empty.
        messages: Vec<String>,
    },
    /// Challonge returned an unexpected status code.
    #[error("unexpected Challonge response status {status} for `{path}`")]
    RequestStatus {
        /// Request path relative to the tournament.
        path: String,
        /// Server error or otherwise unexpected status.
        status: StatusCode,
    },
    /// Response payload could not be decoded.
    #[error("failed to decode Challonge response for `{path}`")]
    DecodeResponse {
        /// Request path relative to the tournament.
        path: String,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },
}

impl From<ChallongeError> for RemoteError {
    fn from(err: ChallongeError) -> Self {
        match err {
            ChallongeError::Rejected { .. } => RemoteError::rejected(err.to_string()),
            ChallongeError::Unauthorized { .. } | ChallongeError::RequestStatus { .. } => {
                RemoteError::unreachable(err.to_string())
            }
            other => RemoteError::transport(other.to_string(), other),
        }
    }
}
