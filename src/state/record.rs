//! Queue entries and their call order.

use std::cmp::Ordering;

use crate::{
    dao::models::{MatchId, MatchState, ParticipantId, RawMatch},
    state::{directory::ParticipantDirectory, queue::QueueError},
};

/// Open bracket match joined with participant tags and the local marker.
///
/// Only open matches become records, so both tags are always resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Remote match id, used when submitting a result.
    pub id: MatchId,
    /// Operator-facing code, unique among open matches.
    pub identifier: String,
    /// First player.
    pub player1_id: ParticipantId,
    /// Second player.
    pub player2_id: ParticipantId,
    /// Display tag of the first player.
    pub player1_tag: String,
    /// Display tag of the second player.
    pub player2_tag: String,
    /// Remote call order hint; `None` sorts last.
    pub suggested_play_order: Option<u32>,
    /// Always taken from the override store, never from the remote fetch.
    pub in_progress: bool,
}

impl MatchRecord {
    /// Build a record for an open raw match; other states yield `None` and are
    /// never tag-resolved since their players may be undetermined.
    pub fn resolve(
        raw: &RawMatch,
        directory: &ParticipantDirectory,
    ) -> Result<Option<Self>, QueueError> {
        if raw.state != MatchState::Open {
            return Ok(None);
        }

        let (player1_id, player1_tag) = resolve_player(raw, raw.player1_id, directory)?;
        let (player2_id, player2_tag) = resolve_player(raw, raw.player2_id, directory)?;

        Ok(Some(Self {
            id: raw.id,
            identifier: raw.identifier.clone(),
            player1_id,
            player2_id,
            player1_tag,
            player2_tag,
            suggested_play_order: raw.suggested_play_order,
            in_progress: false,
        }))
    }

    /// Identifier prefixed with `*` when in progress, e.g. `*A:` or ` B:`.
    pub fn marked_identifier(&self) -> String {
        let marker = if self.in_progress { '*' } else { ' ' };
        format!("{marker}{}:", self.identifier)
    }

    /// Display cells of a queue row.
    pub fn display_fields(&self) -> [String; 4] {
        [
            self.marked_identifier(),
            self.player1_tag.clone(),
            "vs".to_string(),
            self.player2_tag.clone(),
        ]
    }

    /// Queue order: unclaimed before in progress, then by suggested play order
    /// (unnumbered last), then by identifier.
    pub fn queue_order(&self, other: &Self) -> Ordering {
        self.in_progress
            .cmp(&other.in_progress)
            .then_with(|| {
                let left = self.suggested_play_order.unwrap_or(u32::MAX);
                let right = other.suggested_play_order.unwrap_or(u32::MAX);
                left.cmp(&right)
            })
            .then_with(|| self.identifier.cmp(&other.identifier))
    }
}

fn resolve_player(
    raw: &RawMatch,
    id: Option<ParticipantId>,
    directory: &ParticipantDirectory,
) -> Result<(ParticipantId, String), QueueError> {
    let id = id.ok_or_else(|| QueueError::UnknownParticipant {
        identifier: raw.identifier.clone(),
        participant: None,
    })?;
    let tag = directory
        .tag(id)
        .ok_or_else(|| QueueError::UnknownParticipant {
            identifier: raw.identifier.clone(),
            participant: Some(id),
        })?;
    Ok((id, tag.to_string()))
}

/// Sort records in queue order.
pub fn sort_queue(records: &mut [MatchRecord]) {
    records.sort_by(MatchRecord::queue_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::Participant;

    fn directory() -> ParticipantDirectory {
        ParticipantDirectory::new(vec![Participant::new(1, "Mango"), Participant::new(2, "Zain")])
    }

    fn record(identifier: &str, order: u32, in_progress: bool) -> MatchRecord {
        let raw = RawMatch::open(1, identifier, 1, 2, order);
        let mut record = MatchRecord::resolve(&raw, &directory()).unwrap().unwrap();
        record.in_progress = in_progress;
        record
    }

    #[test]
    fn unclaimed_matches_sort_before_claimed_ones() {
        let mut queue = vec![record("A", 2, false), record("B", 1, true), record("C", 1, false)];
        sort_queue(&mut queue);

        let order: Vec<_> = queue.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }

    #[test]
    fn unnumbered_matches_sort_last_within_group() {
        let mut unnumbered = record("A", 0, false);
        unnumbered.suggested_play_order = None;
        let mut queue = vec![unnumbered, record("B", 9, false)];
        sort_queue(&mut queue);

        assert_eq!(queue[0].identifier, "B");
    }

    #[test]
    fn pending_matches_are_not_resolved() {
        let raw = RawMatch::pending(5, "D", 4);
        assert_eq!(MatchRecord::resolve(&raw, &directory()).unwrap(), None);
    }

    #[test]
    fn open_match_with_unknown_player_fails() {
        let raw = RawMatch::open(5, "D", 1, 99, 4);
        let err = MatchRecord::resolve(&raw, &directory()).unwrap_err();
        assert_eq!(
            err,
            QueueError::UnknownParticipant {
                identifier: "D".into(),
                participant: Some(ParticipantId(99)),
            }
        );
    }

    #[test]
    fn display_fields_mark_in_progress() {
        assert_eq!(
            record("A", 1, true).display_fields(),
            ["*A:".to_string(), "Mango".into(), "vs".into(), "Zain".into()]
        );
        assert_eq!(record("B", 1, false).display_fields()[0], " B:");
    }
}
