//! Participant tags looked up by id.

use std::collections::HashMap;

use crate::dao::models::{Participant, ParticipantId};

/// Participant id to display tag lookup, built once per session.
#[derive(Debug, Clone, Default)]
pub struct ParticipantDirectory {
    tags: HashMap<ParticipantId, String>,
}

impl ParticipantDirectory {
    /// Index `participants` by id.
    pub fn new(participants: Vec<Participant>) -> Self {
        let tags = participants
            .into_iter()
            .map(|participant| (participant.id, participant.display_tag))
            .collect();
        Self { tags }
    }

    /// Display tag of `id`, if the participant is known.
    pub fn tag(&self, id: ParticipantId) -> Option<&str> {
        self.tags.get(&id).map(String::as_str)
    }
}
