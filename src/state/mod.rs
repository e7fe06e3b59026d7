//! Session state: the participant directory, operator markers and the
//! current match queue, plus the shared wrapper used by the HTTP facade.

pub mod directory;
pub mod overrides;
pub mod queue;
pub mod record;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::{
    dao::bracket::BracketClient,
    error::ServiceError,
    services::report_service::{ReportPlan, Score},
};

use self::{
    directory::ParticipantDirectory,
    overrides::OverrideStore,
    queue::{MatchQueue, QueueError, RefreshOutcome},
    record::MatchRecord,
};

/// Shared application state handle used by the HTTP facade.
pub type SharedState = Arc<AppState>;

/// What happened after a result was accepted by the remote bracket.
#[derive(Debug)]
pub enum ReportOutcome {
    /// The queue was refreshed after the submission.
    Refreshed(RefreshOutcome),
    /// The result is recorded but the follow-up refresh failed. The queue is
    /// the previous one with the reported match's marker cleared.
    Stale(ServiceError),
}

/// One operator session against one remote bracket.
///
/// Owns everything the remote service cannot hold for us: the participant
/// directory fetched at start, the in-progress markers, and the current queue.
pub struct Session {
    client: Arc<dyn BracketClient>,
    directory: ParticipantDirectory,
    overrides: OverrideStore,
    queue: MatchQueue,
}

impl Session {
    /// Fetch participants once, then build the first queue.
    pub async fn open(
        client: Arc<dyn BracketClient>,
    ) -> Result<(Self, RefreshOutcome), ServiceError> {
        let participants = client.list_participants().await?;
        info!(count = participants.len(), "loaded participant directory");

        let mut session = Self {
            client,
            directory: ParticipantDirectory::new(participants),
            overrides: OverrideStore::new(),
            queue: MatchQueue::default(),
        };
        let outcome = session.refresh().await?;
        Ok((session, outcome))
    }

    /// Fetch matches and rebuild the queue, keeping operator markers.
    ///
    /// A failed fetch or merge leaves the previous queue in place.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, ServiceError> {
        let raw = self.client.list_matches().await?;
        let outcome = self
            .queue
            .rebuild(&raw, &self.directory, &mut self.overrides)?;

        if outcome.dropped_overrides > 0 {
            debug!(
                dropped = outcome.dropped_overrides,
                "dropped markers for matches no longer open"
            );
        }
        if outcome.tournament_completed {
            info!(total = outcome.total, "no open matches left; tournament complete");
        }
        debug!(open = outcome.open, total = outcome.total, "queue refreshed");
        Ok(outcome)
    }

    /// Open matches in call order.
    pub fn queue(&self) -> &[MatchRecord] {
        self.queue.records()
    }

    /// Whether the last refresh found matches but none still open.
    pub fn is_complete(&self) -> bool {
        self.queue.is_complete()
    }

    /// Operator markers currently held.
    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    /// Look a match of the current queue up by identifier.
    pub fn find(&self, identifier: &str) -> Result<&MatchRecord, QueueError> {
        self.queue
            .find(identifier)
            .ok_or_else(|| QueueError::UnknownMatch(identifier.to_string()))
    }

    /// Flip the in-progress marker of a queued match; returns the new value.
    pub fn toggle(&mut self, identifier: &str) -> Result<bool, ServiceError> {
        let in_progress = self.overrides.toggle(identifier, self.queue.records())?;
        self.queue.set_in_progress(identifier, in_progress);
        info!(%identifier, in_progress, "toggled match marker");
        Ok(in_progress)
    }

    /// Validate a report and work out who won, without touching any state.
    pub fn plan_report(&self, identifier: &str, score: &str) -> Result<ReportPlan, ServiceError> {
        let score = Score::parse(score)?;
        let record = self.find(identifier)?;
        Ok(ReportPlan::new(record, &score)?)
    }

    /// Send a confirmed result and clear the match's marker.
    ///
    /// The queue itself is only replaced by the following [`Session::refresh`].
    /// On failure nothing local changes, so the same plan can be resubmitted.
    pub async fn submit_report(&mut self, plan: &ReportPlan) -> Result<(), ServiceError> {
        if let Err(err) = self
            .client
            .submit_result(plan.match_id, plan.scores_csv.clone(), plan.winner_id)
            .await
        {
            warn!(identifier = %plan.identifier, error = %err, "result submission failed");
            return Err(err.into());
        }

        self.overrides.clear(&plan.identifier);
        self.queue.set_in_progress(&plan.identifier, false);
        info!(
            identifier = %plan.identifier,
            score = %plan.scores_csv,
            winner = %plan.winner_tag,
            "reported match result"
        );
        Ok(())
    }

    /// Submit a confirmed result, then refresh the queue.
    ///
    /// Only a failed submission is an error. Once the remote has accepted the
    /// result, a failed refresh is returned as [`ReportOutcome::Stale`] so the
    /// caller does not mistake a recorded result for a lost one.
    pub async fn report(&mut self, plan: &ReportPlan) -> Result<ReportOutcome, ServiceError> {
        self.submit_report(plan).await?;
        match self.refresh().await {
            Ok(outcome) => Ok(ReportOutcome::Refreshed(outcome)),
            Err(err) => {
                warn!(
                    identifier = %plan.identifier,
                    error = %err,
                    "result recorded but the follow-up refresh failed"
                );
                Ok(ReportOutcome::Stale(err))
            }
        }
    }
}

/// Shared state of the HTTP facade: one session, one request at a time.
pub struct AppState {
    session: Mutex<Session>,
}

impl AppState {
    /// Wrap a session for sharing across request handlers.
    pub fn new(session: Session) -> SharedState {
        Arc::new(Self {
            session: Mutex::new(session),
        })
    }

    /// Exclusive access to the session for the duration of one request.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }
}
