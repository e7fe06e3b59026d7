//! Backend-neutral contract for talking to a remote bracket.

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::models::{MatchId, Participant, ParticipantId, RawMatch};

/// Result alias for remote bracket operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure reported by a remote bracket backend regardless of the wire protocol.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service could not be reached, or refused our credentials.
    #[error("remote bracket unreachable: {message}")]
    Transport {
        /// What failed, for the operator.
        message: String,
        /// Underlying cause when one exists.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
    /// The service understood the request and refused it.
    #[error("remote bracket rejected the request: {message}")]
    Rejected {
        /// Reason given by the service.
        message: String,
    },
}

impl RemoteError {
    /// Construct a transport error from any backend failure.
    pub fn transport(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        RemoteError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Transport error without an underlying cause (bad status codes, auth).
    pub fn unreachable(message: impl Into<String>) -> Self {
        RemoteError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Rejection of a well-formed request.
    pub fn rejected(message: impl Into<String>) -> Self {
        RemoteError::Rejected {
            message: message.into(),
        }
    }
}

/// The three operations the match queue needs from a remote bracket.
///
/// Implementations perform no retries; the operator reissues commands instead.
pub trait BracketClient: Send + Sync {
    /// Every participant of the tournament.
    fn list_participants(&self) -> BoxFuture<'static, RemoteResult<Vec<Participant>>>;
    /// Every match of the tournament, any state.
    fn list_matches(&self) -> BoxFuture<'static, RemoteResult<Vec<RawMatch>>>;
    /// Record a finished match. `scores_csv` is always in `player1-player2` order.
    fn submit_result(
        &self,
        match_id: MatchId,
        scores_csv: String,
        winner_id: ParticipantId,
    ) -> BoxFuture<'static, RemoteResult<()>>;
}
