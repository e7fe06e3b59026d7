//! DTOs exposing the match queue over HTTP.

use std::time::SystemTime;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::format_system_time,
    state::{Session, record::MatchRecord},
};

/// One queued match with its display fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchView {
    /// Remote match id.
    pub id: u64,
    /// Operator-facing code such as `A`.
    pub identifier: String,
    /// First player's remote id.
    pub player1_id: u64,
    /// Second player's remote id.
    pub player2_id: u64,
    /// First player's display tag.
    pub player1_tag: String,
    /// Second player's display tag.
    pub player2_tag: String,
    /// Remote call order hint.
    pub suggested_play_order: Option<u32>,
    /// Operator marker.
    pub in_progress: bool,
}

impl From<&MatchRecord> for MatchView {
    fn from(record: &MatchRecord) -> Self {
        Self {
            id: record.id.0,
            identifier: record.identifier.clone(),
            player1_id: record.player1_id.0,
            player2_id: record.player2_id.0,
            player1_tag: record.player1_tag.clone(),
            player2_tag: record.player2_tag.clone(),
            suggested_play_order: record.suggested_play_order,
            in_progress: record.in_progress,
        }
    }
}

/// Queue snapshot returned after a refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchesResponse {
    /// RFC 3339 timestamp of the snapshot.
    pub refreshed_at: String,
    /// True once the bracket has matches but none left open.
    pub tournament_complete: bool,
    /// Open matches in call order.
    pub matches: Vec<MatchView>,
}

impl MatchesResponse {
    /// Snapshot the session's current queue.
    pub fn from_session(session: &Session) -> Self {
        Self {
            refreshed_at: format_system_time(SystemTime::now()),
            tournament_complete: session.is_complete(),
            matches: session.queue().iter().map(MatchView::from).collect(),
        }
    }
}

/// New marker state after a toggle.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResponse {
    /// Upper-cased match code.
    pub identifier: String,
    /// Marker value after the toggle.
    pub in_progress: bool,
}
