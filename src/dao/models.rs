//! Bracket models shared by every backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque participant identifier assigned by the remote bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque match identifier assigned by the remote bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bracket entrant as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Remote identifier.
    pub id: ParticipantId,
    /// Name shown to the operator.
    pub display_tag: String,
}

impl Participant {
    /// Participant with the given id and tag.
    pub fn new(id: u64, display_tag: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            display_tag: display_tag.into(),
        }
    }
}

/// Lifecycle of a bracket match on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    /// At least one participant is still undetermined.
    Pending,
    /// Both participants are known and no result has been recorded.
    Open,
    /// A result has been recorded.
    Complete,
}

/// Match exactly as fetched from the remote service, before any local merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Remote identifier used when submitting results.
    pub id: MatchId,
    /// Short operator-facing code such as `A` or `B1`.
    pub identifier: String,
    /// First player, `None` while undetermined.
    pub player1_id: Option<ParticipantId>,
    /// Second player, `None` while undetermined.
    pub player2_id: Option<ParticipantId>,
    /// Remote lifecycle state.
    pub state: MatchState,
    /// Remote hint for call order; `None` sorts after every numbered match.
    pub suggested_play_order: Option<u32>,
    /// Whether the remote side flagged the match as underway. Never used for
    /// the queue's in-progress marker.
    pub underway: bool,
}

impl RawMatch {
    /// Open match between two known participants.
    pub fn open(id: u64, identifier: impl Into<String>, player1: u64, player2: u64, order: u32) -> Self {
        Self {
            id: MatchId(id),
            identifier: identifier.into(),
            player1_id: Some(ParticipantId(player1)),
            player2_id: Some(ParticipantId(player2)),
            state: MatchState::Open,
            suggested_play_order: Some(order),
            underway: false,
        }
    }

    /// Match still waiting on earlier results.
    pub fn pending(id: u64, identifier: impl Into<String>, order: u32) -> Self {
        Self {
            id: MatchId(id),
            identifier: identifier.into(),
            player1_id: None,
            player2_id: None,
            state: MatchState::Pending,
            suggested_play_order: Some(order),
            underway: false,
        }
    }
}
