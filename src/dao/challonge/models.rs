//! Wire shapes of the Challonge v1 JSON API.

use serde::{Deserialize, Serialize};

use crate::dao::models::{MatchId, MatchState, Participant, ParticipantId, RawMatch};

/// Challonge wraps every list element in an object keyed by its type.
#[derive(Debug, Deserialize)]
pub struct ParticipantEnvelope {
    pub participant: ChallongeParticipant,
}

#[derive(Debug, Deserialize)]
pub struct ChallongeParticipant {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<ChallongeParticipant> for Participant {
    fn from(value: ChallongeParticipant) -> Self {
        let display_tag = value
            .display_name
            .filter(|name| !name.trim().is_empty())
            .or(value.name)
            .unwrap_or_else(|| format!("#{}", value.id));
        Participant {
            id: ParticipantId(value.id),
            display_tag,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchEnvelope {
    #[serde(rename = "match")]
    pub body: ChallongeMatch,
}

#[derive(Debug, Deserialize)]
pub struct ChallongeMatch {
    pub id: u64,
    pub identifier: String,
    #[serde(default)]
    pub player1_id: Option<u64>,
    #[serde(default)]
    pub player2_id: Option<u64>,
    pub state: MatchState,
    #[serde(default)]
    pub suggested_play_order: Option<u32>,
    #[serde(default)]
    pub underway_at: Option<String>,
}

impl From<ChallongeMatch> for RawMatch {
    fn from(value: ChallongeMatch) -> Self {
        RawMatch {
            id: MatchId(value.id),
            identifier: value.identifier,
            player1_id: value.player1_id.map(ParticipantId),
            player2_id: value.player2_id.map(ParticipantId),
            state: value.state,
            suggested_play_order: value.suggested_play_order,
            underway: value.underway_at.is_some(),
        }
    }
}

/// Body of `PUT /tournaments/{tournament}/matches/{id}.json`.
#[derive(Debug, Serialize)]
pub struct MatchUpdateRequest {
    #[serde(rename = "match")]
    pub body: MatchUpdate,
}

#[derive(Debug, Serialize)]
pub struct MatchUpdate {
    pub scores_csv: String,
    pub winner_id: u64,
}

/// Error payload Challonge attaches to 4xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorsResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}
