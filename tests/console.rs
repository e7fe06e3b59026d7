//! Scripted operator sessions against the in-memory bracket.

use std::sync::Arc;

use bracket_console::{
    console::{COMPLETED_MESSAGE, Console},
    dao::{
        memory::{InMemoryBracket, ScriptedFailure},
        models::{MatchId, Participant, ParticipantId, RawMatch},
    },
    services::report_service::REPORT_USAGE,
    state::{Session, queue::RefreshOutcome},
};

async fn open(bracket: &InMemoryBracket) -> (Session, RefreshOutcome) {
    Session::open(Arc::new(bracket.clone())).await.unwrap()
}

/// Feed `script` to a console over `bracket` and collect everything printed.
async fn run_script(bracket: &InMemoryBracket, script: &str) -> (Session, String) {
    let (session, outcome) = open(bracket).await;
    let mut console = Console::new(session, script.as_bytes(), Vec::new());
    console.announce(&outcome).unwrap();
    console.run().await.unwrap();

    let (session, out) = console.into_parts();
    (session, String::from_utf8(out).unwrap())
}

fn single_match() -> InMemoryBracket {
    InMemoryBracket::new(
        vec![Participant::new(1, "Mango"), Participant::new(2, "Armada")],
        vec![RawMatch::open(10, "A", 1, 2, 1)],
    )
}

#[tokio::test]
async fn prints_queue_and_exits_on_end_of_input() {
    let bracket = InMemoryBracket::demo();
    let (session, out) = run_script(&bracket, "").await;

    assert!(out.contains(" A: Mango     vs Armada"));
    assert!(out.contains(" F: Armada    vs Hungrybox"));
    assert!(out.contains("> "));
    assert_eq!(session.queue().len(), 6);
}

#[tokio::test]
async fn start_marks_match_and_moves_it_last() {
    let bracket = InMemoryBracket::demo();
    let (session, out) = run_script(&bracket, "* a\nq\n").await;

    assert!(out.contains("*A:"));
    assert_eq!(session.queue().last().unwrap().identifier, "A");
    assert!(session.overrides().is_marked("A"));
}

#[tokio::test]
async fn tie_is_refused_without_submitting() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "r A 1-1\nq\n").await;

    assert!(out.contains("A tie? I don't think so."));
    assert!(bracket.submissions().is_empty());
}

#[tokio::test]
async fn malformed_score_prints_usage() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "report A two-zero\n").await;

    assert!(out.contains(REPORT_USAGE));
    assert!(bracket.submissions().is_empty());
}

#[tokio::test]
async fn unknown_identifier_is_reported() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "r z 2-0\n* q\n").await;

    assert!(out.contains("match Z not found."));
    assert!(out.contains("match Q not found."));
    assert!(bracket.submissions().is_empty());
}

#[tokio::test]
async fn declined_confirmation_submits_nothing() {
    let bracket = InMemoryBracket::demo();
    let (session, out) = run_script(&bracket, "r A 2-0\nn\nr A 2-0\n\n").await;

    assert_eq!(out.matches("Mango beat Armada 2-0? [y/N] ").count(), 2);
    assert!(bracket.submissions().is_empty());
    assert!(session.find("A").is_ok());
}

#[tokio::test]
async fn confirmed_report_submits_and_clears_marker() {
    let bracket = InMemoryBracket::demo();
    let (session, out) = run_script(&bracket, "* a\nr a 0-2\nyes\nq\n").await;

    assert!(out.contains("Armada beat Mango 2-0? [y/N] "));
    let submissions = bracket.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].match_id, MatchId(100));
    assert_eq!(submissions[0].scores_csv, "0-2");
    assert_eq!(submissions[0].winner_id, ParticipantId(2));

    assert!(session.overrides().is_empty());
    assert!(session.find("A").is_err());
    assert_eq!(session.queue().len(), 5);
}

#[tokio::test]
async fn completion_is_announced_once() {
    let bracket = single_match();
    let (session, out) = run_script(&bracket, "r A 2-1\ny\nu\nu\nq\n").await;

    assert_eq!(out.matches(COMPLETED_MESSAGE).count(), 1);
    assert!(session.is_complete());
    assert!(session.queue().is_empty());
}

#[tokio::test]
async fn unknown_command_prints_error_and_help() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "launch A\n").await;

    assert!(out.contains("invalid command: launch"));
    assert!(out.contains("`A` represents the match identifier."));
    assert!(out.contains("report (r)"));
}

#[tokio::test]
async fn empty_line_prints_help() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "\nq\n").await;

    assert!(out.contains("`A` represents the match identifier."));
    assert!(!out.contains("invalid command"));
}

#[tokio::test]
async fn wrong_arity_prints_usage_only() {
    let bracket = InMemoryBracket::demo();
    let (_, out) = run_script(&bracket, "start\n").await;

    assert!(out.contains("* [match identifier]"));
    assert!(!out.contains("`A` represents the match identifier."));
}

#[tokio::test]
async fn rejected_submission_keeps_match_and_suggests_retry() {
    let bracket = InMemoryBracket::demo();
    let (session, _) = open(&bracket).await;
    bracket.fail_next(ScriptedFailure::Rejected);

    let mut console = Console::new(session, "* a\nr A 2-0\ny\nq\n".as_bytes(), Vec::new());
    console.run().await.unwrap();
    let (session, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("report failed: remote bracket rejected the request"));
    assert!(out.contains("nothing was recorded; reissue the command to retry."));
    assert!(bracket.submissions().is_empty());
    assert!(session.overrides().is_marked("A"));
}

#[tokio::test]
async fn failed_update_keeps_previous_queue() {
    let bracket = InMemoryBracket::demo();
    let (session, _) = open(&bracket).await;
    bracket.fail_next(ScriptedFailure::Transport);

    let mut console = Console::new(session, "u\n".as_bytes(), Vec::new());
    console.run().await.unwrap();
    let (session, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("update failed: remote bracket unreachable"));
    assert_eq!(session.queue().len(), 6);
}

#[tokio::test]
async fn recorded_result_is_acknowledged_when_refresh_fails() {
    let bracket = InMemoryBracket::demo();
    let (session, _) = open(&bracket).await;
    bracket.fail_next_fetch(ScriptedFailure::Transport);

    let mut console = Console::new(session, "* a\nr A 2-0\ny\nq\n".as_bytes(), Vec::new());
    console.run().await.unwrap();
    let (session, out) = console.into_parts();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("result recorded, but update failed: remote bracket unreachable"));
    assert!(!out.contains("report failed"));
    assert_eq!(bracket.submissions().len(), 1);
    assert!(session.overrides().is_empty());
    assert!(!session.find("A").unwrap().in_progress);

    let last_queue = out.rsplit("> ").nth(1).unwrap();
    assert!(last_queue.contains(" A: Mango"));
    assert!(!last_queue.contains("*A:"));
}
