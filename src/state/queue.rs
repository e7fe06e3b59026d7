//! Merge of remote match state with local markers into the call queue.

use thiserror::Error;

use crate::{
    dao::models::{ParticipantId, RawMatch},
    state::{
        directory::ParticipantDirectory,
        overrides::OverrideStore,
        record::{MatchRecord, sort_queue},
    },
};

/// Local lookup failures raised while building or querying the queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The identifier does not name a match of the current queue.
    #[error("match {0} not found.")]
    UnknownMatch(String),
    /// An open match references a participant missing from the directory.
    #[error(
        "match {identifier} references unknown participant {}",
        .participant.map(|id| id.to_string()).unwrap_or_else(|| "(undetermined)".into())
    )]
    UnknownParticipant {
        /// Code of the offending match.
        identifier: String,
        /// The unknown id, or `None` when the slot was empty.
        participant: Option<ParticipantId>,
    },
}

/// Summary of a single refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Matches returned by the remote, any state.
    pub total: usize,
    /// Matches now in the queue.
    pub open: usize,
    /// Set only on the refresh where the bracket ran out of open matches.
    pub tournament_completed: bool,
    /// Markers dropped because their match left the queue.
    pub dropped_overrides: usize,
}

/// Ordered open matches of the bracket.
#[derive(Debug, Clone, Default)]
pub struct MatchQueue {
    records: Vec<MatchRecord>,
    complete: bool,
}

impl MatchQueue {
    /// Open matches in call order.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Queued match with the given code.
    pub fn find(&self, identifier: &str) -> Option<&MatchRecord> {
        self.records.iter().find(|record| record.identifier == identifier)
    }

    /// Whether the last refresh saw matches but none of them open.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Replace the queue from a fresh fetch.
    ///
    /// Records are rebuilt from scratch; only override markers carry over. On
    /// error neither the queue nor the overrides are touched.
    pub fn rebuild(
        &mut self,
        raw: &[RawMatch],
        directory: &ParticipantDirectory,
        overrides: &mut OverrideStore,
    ) -> Result<RefreshOutcome, QueueError> {
        let mut records = Vec::with_capacity(raw.len());
        for raw_match in raw {
            if let Some(mut record) = MatchRecord::resolve(raw_match, directory)? {
                record.in_progress = overrides.is_marked(&record.identifier);
                records.push(record);
            }
        }
        sort_queue(&mut records);

        let dropped_overrides =
            overrides.retain_only(records.iter().map(|record| record.identifier.as_str()));

        let finished = !raw.is_empty() && records.is_empty();
        let tournament_completed = finished && !self.complete;
        self.complete = finished;
        self.records = records;

        Ok(RefreshOutcome {
            total: raw.len(),
            open: self.records.len(),
            tournament_completed,
            dropped_overrides,
        })
    }

    /// Update one record's marker in place and restore queue order.
    pub fn set_in_progress(&mut self, identifier: &str, in_progress: bool) {
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|record| record.identifier == identifier)
        {
            record.in_progress = in_progress;
        }
        sort_queue(&mut self.records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::{MatchState, Participant};

    fn directory() -> ParticipantDirectory {
        ParticipantDirectory::new(vec![
            Participant::new(1, "Mango"),
            Participant::new(2, "Armada"),
            Participant::new(3, "Hungrybox"),
            Participant::new(4, "Leffen"),
        ])
    }

    fn identifiers(queue: &MatchQueue) -> Vec<&str> {
        queue.records().iter().map(|r| r.identifier.as_str()).collect()
    }

    #[test]
    fn override_wins_over_remote_underway_flag() {
        let directory = directory();
        let mut overrides = OverrideStore::new();
        let mut queue = MatchQueue::default();

        let mut a = RawMatch::open(1, "A", 1, 2, 1);
        let mut b = RawMatch::open(2, "B", 3, 4, 2);
        b.underway = true;
        queue.rebuild(&[a.clone(), b.clone()], &directory, &mut overrides).unwrap();
        overrides.toggle("A", queue.records()).unwrap();

        a.underway = false;
        queue.rebuild(&[a, b], &directory, &mut overrides).unwrap();

        let a = queue.find("A").unwrap();
        let b = queue.find("B").unwrap();
        assert!(a.in_progress);
        assert!(!b.in_progress);
        assert_eq!(identifiers(&queue), ["B", "A"]);
    }

    #[test]
    fn only_open_matches_are_queued() {
        let mut queue = MatchQueue::default();
        let mut done = RawMatch::open(3, "C", 1, 3, 3);
        done.state = MatchState::Complete;
        let raw = vec![
            RawMatch::open(1, "A", 1, 2, 2),
            RawMatch::pending(2, "B", 1),
            done,
        ];

        let outcome = queue
            .rebuild(&raw, &directory(), &mut OverrideStore::new())
            .unwrap();
        assert_eq!(identifiers(&queue), ["A"]);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.open, 1);
        assert!(!outcome.tournament_completed);
    }

    #[test]
    fn stale_markers_are_dropped() {
        let directory = directory();
        let mut overrides = OverrideStore::new();
        let mut queue = MatchQueue::default();
        let a = RawMatch::open(1, "A", 1, 2, 1);
        queue.rebuild(&[a.clone()], &directory, &mut overrides).unwrap();
        overrides.toggle("A", queue.records()).unwrap();

        let mut closed = a;
        closed.state = MatchState::Complete;
        let outcome = queue
            .rebuild(&[closed, RawMatch::open(2, "B", 3, 4, 2)], &directory, &mut overrides)
            .unwrap();

        assert_eq!(outcome.dropped_overrides, 1);
        assert!(overrides.is_empty());
    }

    #[test]
    fn completion_is_signalled_once_per_transition() {
        let directory = directory();
        let mut overrides = OverrideStore::new();
        let mut queue = MatchQueue::default();
        let open = RawMatch::open(1, "A", 1, 2, 1);
        let mut closed = open.clone();
        closed.state = MatchState::Complete;

        let first = queue.rebuild(&[open.clone()], &directory, &mut overrides).unwrap();
        assert!(!first.tournament_completed);

        let done = queue.rebuild(&[closed.clone()], &directory, &mut overrides).unwrap();
        assert!(done.tournament_completed);
        assert!(queue.is_complete());

        let again = queue.rebuild(&[closed.clone()], &directory, &mut overrides).unwrap();
        assert!(!again.tournament_completed);

        queue.rebuild(&[open], &directory, &mut overrides).unwrap();
        let reopened = queue.rebuild(&[closed], &directory, &mut overrides).unwrap();
        assert!(reopened.tournament_completed);
    }

    #[test]
    fn empty_bracket_is_not_complete() {
        let outcome = MatchQueue::default()
            .rebuild(&[], &directory(), &mut OverrideStore::new())
            .unwrap();
        assert!(!outcome.tournament_completed);
    }

    #[test]
    fn failed_rebuild_keeps_previous_queue() {
        let directory = directory();
        let mut overrides = OverrideStore::new();
        let mut queue = MatchQueue::default();
        queue
            .rebuild(&[RawMatch::open(1, "A", 1, 2, 1)], &directory, &mut overrides)
            .unwrap();
        overrides.toggle("A", queue.records()).unwrap();

        let err = queue
            .rebuild(&[RawMatch::open(2, "B", 1, 42, 1)], &directory, &mut overrides)
            .unwrap_err();

        assert!(matches!(err, QueueError::UnknownParticipant { .. }));
        assert_eq!(identifiers(&queue), ["A"]);
        assert!(overrides.is_marked("A"));
    }

    #[test]
    fn toggling_resorts_the_queue() {
        let directory = directory();
        let mut overrides = OverrideStore::new();
        let mut queue = MatchQueue::default();
        let raw = vec![RawMatch::open(1, "A", 1, 2, 1), RawMatch::open(2, "B", 3, 4, 2)];
        queue.rebuild(&raw, &directory, &mut overrides).unwrap();

        queue.set_in_progress("A", true);
        assert_eq!(identifiers(&queue), ["B", "A"]);
    }
}
