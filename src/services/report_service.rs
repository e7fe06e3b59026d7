//! Score parsing and winner determination for result reports.

use thiserror::Error;

use crate::{
    dao::models::{MatchId, ParticipantId},
    state::record::MatchRecord,
};

/// Usage line shown whenever a report command is malformed.
pub const REPORT_USAGE: &str = "r [match identifier] [player 1 score]-[player 2 score]";

/// Reasons a report is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Score is not `<digits>-<digits>`.
    #[error("{}", REPORT_USAGE)]
    MalformedScore(String),
    /// A score component does not fit in a game count.
    #[error("score {0} is too large to report.")]
    ScoreTooLarge(String),
    /// Equal scores; the remote tiebreak rules are never invoked.
    #[error("A tie? I don't think so.")]
    Tie,
}

/// Score as typed by the operator, in `player1-player2` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Games won by player 1.
    pub player1: u32,
    /// Games won by player 2.
    pub player2: u32,
    csv: String,
}

impl Score {
    /// Parse `<digits>-<digits>`.
    pub fn parse(input: &str) -> Result<Self, ReportError> {
        let (left, right) = input
            .split_once('-')
            .ok_or_else(|| ReportError::MalformedScore(input.to_string()))?;
        let player1 = parse_component(left, input)?;
        let player2 = parse_component(right, input)?;
        Ok(Self {
            player1,
            player2,
            csv: input.to_string(),
        })
    }

    /// The score exactly as submitted to the remote bracket.
    pub fn as_csv(&self) -> &str {
        &self.csv
    }
}

fn parse_component(value: &str, input: &str) -> Result<u32, ReportError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReportError::MalformedScore(input.to_string()));
    }
    // digits only, so parsing can only fail on overflow
    value
        .parse()
        .map_err(|_| ReportError::ScoreTooLarge(input.to_string()))
}

/// Everything needed to confirm and submit one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPlan {
    /// Remote id of the reported match.
    pub match_id: MatchId,
    /// Operator-facing code of the reported match.
    pub identifier: String,
    /// Submission payload, always `player1-player2`.
    pub scores_csv: String,
    /// Player with the higher score.
    pub winner_id: ParticipantId,
    /// Display tag of the winner.
    pub winner_tag: String,
    /// Display tag of the loser.
    pub loser_tag: String,
    /// Winner-first rendering of the score for the confirmation prompt.
    pub display_score: String,
}

impl ReportPlan {
    /// Decide the winner numerically; ties are refused.
    pub fn new(record: &MatchRecord, score: &Score) -> Result<Self, ReportError> {
        let (winner_id, winner_tag, loser_tag, display_score) = if score.player1 > score.player2 {
            (
                record.player1_id,
                &record.player1_tag,
                &record.player2_tag,
                score.as_csv().to_string(),
            )
        } else if score.player2 > score.player1 {
            (
                record.player2_id,
                &record.player2_tag,
                &record.player1_tag,
                format!("{}-{}", score.player2, score.player1),
            )
        } else {
            return Err(ReportError::Tie);
        };

        Ok(Self {
            match_id: record.id,
            identifier: record.identifier.clone(),
            scores_csv: score.as_csv().to_string(),
            winner_id,
            winner_tag: winner_tag.clone(),
            loser_tag: loser_tag.clone(),
            display_score,
        })
    }

    /// Question put to the operator before anything is submitted.
    pub fn confirmation_question(&self) -> String {
        format!(
            "{} beat {} {}?",
            self.winner_tag, self.loser_tag, self.display_score
        )
    }
}
