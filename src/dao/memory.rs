//! Bracket backend kept entirely in process memory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use tracing::debug;

use crate::dao::{
    bracket::{BracketClient, RemoteError, RemoteResult},
    models::{MatchId, MatchState, Participant, ParticipantId, RawMatch},
};

/// Failure the next remote call should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Fails like an unreachable service.
    Transport,
    /// Fails like a service refusing the request.
    Rejected,
}

/// Result recorded through [`BracketClient::submit_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Match the result was recorded for.
    pub match_id: MatchId,
    /// Score as submitted, `player1-player2`.
    pub scores_csv: String,
    /// Declared winner.
    pub winner_id: ParticipantId,
}

#[derive(Debug, Default)]
struct Inner {
    participants: Vec<Participant>,
    matches: Vec<RawMatch>,
    submissions: Vec<Submission>,
    fail_next: Option<ScriptedFailure>,
    fail_next_fetch: Option<ScriptedFailure>,
    keep_reported_open: bool,
    match_fetches: usize,
}

/// Cloneable handle over a shared in-memory bracket.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBracket {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBracket {
    /// Bracket holding exactly the given participants and matches.
    pub fn new(participants: Vec<Participant>, matches: Vec<RawMatch>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                participants,
                matches,
                ..Inner::default()
            })),
        }
    }

    /// Four-player round robin where every match is open from the start.
    pub fn demo() -> Self {
        let participants = vec![
            Participant::new(1, "Mango"),
            Participant::new(2, "Armada"),
            Participant::new(3, "Hungrybox"),
            Participant::new(4, "Leffen"),
        ];
        let pairings = [(1, 2), (3, 4), (1, 3), (2, 4), (1, 4), (2, 3)];
        let matches = pairings
            .iter()
            .enumerate()
            .map(|(index, (p1, p2))| {
                let code = char::from(b'A' + index as u8).to_string();
                RawMatch::open(100 + index as u64, code, *p1, *p2, index as u32 + 1)
            })
            .collect();
        Self::new(participants, matches)
    }

    /// Leave reported matches open, as a bracket reset on the remote side would.
    pub fn keep_reported_open(self, keep: bool) -> Self {
        self.lock().keep_reported_open = keep;
        self
    }

    /// Make the next remote call fail with `failure`.
    pub fn fail_next(&self, failure: ScriptedFailure) {
        self.lock().fail_next = Some(failure);
    }

    /// Make the next match fetch fail; submissions and participant fetches
    /// are unaffected.
    pub fn fail_next_fetch(&self, failure: ScriptedFailure) {
        self.lock().fail_next_fetch = Some(failure);
    }

    /// Every result accepted so far, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.lock().submissions.clone()
    }

    /// Number of times the match list has been fetched.
    pub fn match_fetches(&self) -> usize {
        self.lock().match_fetches
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_failure(slot: &mut Option<ScriptedFailure>) -> RemoteResult<()> {
        match slot.take() {
            Some(ScriptedFailure::Transport) => {
                Err(RemoteError::unreachable("scripted transport failure"))
            }
            Some(ScriptedFailure::Rejected) => Err(RemoteError::rejected("scripted rejection")),
            None => Ok(()),
        }
    }
}

impl BracketClient for InMemoryBracket {
    fn list_participants(&self) -> BoxFuture<'static, RemoteResult<Vec<Participant>>> {
        let bracket = self.clone();
        Box::pin(async move {
            let mut inner = bracket.lock();
            Self::take_failure(&mut inner.fail_next)?;
            Ok(inner.participants.clone())
        })
    }

    fn list_matches(&self) -> BoxFuture<'static, RemoteResult<Vec<RawMatch>>> {
        let bracket = self.clone();
        Box::pin(async move {
            let mut inner = bracket.lock();
            Self::take_failure(&mut inner.fail_next)?;
            Self::take_failure(&mut inner.fail_next_fetch)?;
            inner.match_fetches += 1;
            Ok(inner.matches.clone())
        })
    }

    fn submit_result(
        &self,
        match_id: MatchId,
        scores_csv: String,
        winner_id: ParticipantId,
    ) -> BoxFuture<'static, RemoteResult<()>> {
        let bracket = self.clone();
        Box::pin(async move {
            let mut inner = bracket.lock();
            Self::take_failure(&mut inner.fail_next)?;

            let keep_open = inner.keep_reported_open;
            let Some(found) = inner.matches.iter_mut().find(|m| m.id == match_id) else {
                return Err(RemoteError::rejected(format!("match {match_id} does not exist")));
            };
            if found.state != MatchState::Open {
                return Err(RemoteError::rejected(format!("match {match_id} is not open")));
            }
            if found.player1_id != Some(winner_id) && found.player2_id != Some(winner_id) {
                return Err(RemoteError::rejected(format!(
                    "participant {winner_id} does not play in match {match_id}"
                )));
            }
            if !keep_open {
                found.state = MatchState::Complete;
            }

            debug!(%match_id, %scores_csv, %winner_id, "recorded in-memory result");
            inner.submissions.push(Submission {
                match_id,
                scores_csv,
                winner_id,
            });
            Ok(())
        })
    }
}
