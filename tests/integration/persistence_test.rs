//! Persistence Coordinator Integration Tests
//!
//! Verifies pitch creation against the authoritative store with
//! best-effort side writes:
//! - success writes the pitch, the analytics row and the notification
//! - analytics or notification failures never fail the request
//! - an authoritative-store failure fails the request with no side writes

use pitch_writer::models::analytics::{PITCH_CREATED_EVENT, UNSPECIFIED};
use pitch_writer::models::pitch::NewPitch;
use pitch_writer::services::analytics::AnalyticsStore;
use pitch_writer::services::persistence::{ANALYTICS_TASK, NOTIFY_TASK};
use pitch_writer::services::repository::PitchRepository;
use pitch_writer::services::workflow::WorkflowResponse;
use pitch_writer::AppError;
use pitch_writer_core::{PitchField, PitchFields};
use serde_json::json;

use crate::fakes::{Harness, ScriptedProvider, ANALYTICS_WORKFLOW};

fn harness() -> Harness {
    let harness = Harness::new(ScriptedProvider::replying("unused"));
    harness
        .workflow
        .respond(ANALYTICS_WORKFLOW, WorkflowResponse::ok(json!({ "received": true })));
    harness
}

fn draft() -> NewPitch {
    NewPitch::new(PitchFields {
        title: "Solar Drones".to_string(),
        pitch_type: "startup".to_string(),
        audience: "investors".to_string(),
        problem: "Rural clinics lose power daily".to_string(),
        solution: "Drone delivered batteries".to_string(),
        ..Default::default()
    })
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_create_writes_pitch_analytics_and_event() {
    let h = harness();

    let (pitch, outcomes) = h
        .state
        .persistence()
        .create_pitch_with_report("alice", &draft())
        .await
        .unwrap();

    assert!(!pitch.id.is_empty());
    assert_eq!(pitch.user_id, "alice");
    assert_eq!(pitch.created_at, pitch.updated_at);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.succeeded), "{:?}", outcomes);

    let stored = h.pitches.get("alice", &pitch.id).await.unwrap();
    assert_eq!(stored, pitch);

    let rows = h.analytics.list_for_owner("alice").await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.pitch_id, pitch.id);
    assert_eq!(row.pitch_type, "startup");
    assert_eq!(row.audience, "investors");
    assert_eq!(row.word_count.field(PitchField::Title), 2);
    assert_eq!(row.word_count.field(PitchField::Problem), 5);
    assert_eq!(row.word_count.field(PitchField::Solution), 3);
    assert_eq!(row.word_count.field(PitchField::Team), 0);
    assert_eq!(row.word_count.total, 2 + 1 + 1 + 5 + 3);

    let events = h.workflow.calls_to(ANALYTICS_WORKFLOW);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], PITCH_CREATED_EVENT);
    let data = &events[0]["data"];
    assert_eq!(data["pitch_id"], pitch.id.as_str());
    assert_eq!(data["user_id"], "alice");
    assert_eq!(data["type"], "startup");
    assert_eq!(data["audience"], "investors");
    let mut keys: Vec<&str> = data.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["audience", "pitch_id", "type", "user_id"]);
}

#[tokio::test]
async fn test_missing_type_and_audience_are_unspecified() {
    let h = harness();
    let draft = NewPitch::new(PitchFields {
        title: "Bare".to_string(),
        ..Default::default()
    });

    h.state.persistence().create_pitch("alice", &draft).await.unwrap();

    let rows = h.analytics.list_for_owner("alice").await.unwrap();
    assert_eq!(rows[0].pitch_type, UNSPECIFIED);
    assert_eq!(rows[0].audience, UNSPECIFIED);
}

// ============================================================================
// Side-write failures are isolated
// ============================================================================

#[tokio::test]
async fn test_analytics_failure_still_returns_pitch() {
    let h = harness();
    h.analytics.fail_inserts(true);

    let (pitch, outcomes) = h
        .state
        .persistence()
        .create_pitch_with_report("alice", &draft())
        .await
        .unwrap();

    assert!(h.pitches.get("alice", &pitch.id).await.is_ok());
    assert_eq!(h.analytics.attempts(), 1);
    let analytics = outcomes.iter().find(|o| o.task == ANALYTICS_TASK).unwrap();
    assert!(!analytics.succeeded);
    assert!(analytics.error.is_some());
    let notify = outcomes.iter().find(|o| o.task == NOTIFY_TASK).unwrap();
    assert!(notify.succeeded, "notification is independent of analytics");
    assert_eq!(h.workflow.calls_to(ANALYTICS_WORKFLOW).len(), 1);
}

#[tokio::test]
async fn test_notification_failure_still_returns_pitch() {
    let h = harness();
    h.workflow
        .respond(ANALYTICS_WORKFLOW, WorkflowResponse::failed("webhook offline"));

    let (pitch, outcomes) = h
        .state
        .persistence()
        .create_pitch_with_report("alice", &draft())
        .await
        .unwrap();

    assert!(h.pitches.get("alice", &pitch.id).await.is_ok());
    let notify = outcomes.iter().find(|o| o.task == NOTIFY_TASK).unwrap();
    assert!(!notify.succeeded);
    assert!(notify.error.as_deref().unwrap().contains("webhook offline"));
    assert_eq!(h.analytics.list_for_owner("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_both_side_writes_failing_still_returns_pitch() {
    let h = harness();
    h.analytics.fail_inserts(true);
    h.workflow
        .respond(ANALYTICS_WORKFLOW, WorkflowResponse::failed("webhook offline"));

    let pitch = h
        .state
        .persistence()
        .create_pitch("alice", &draft())
        .await
        .unwrap();

    assert_eq!(pitch.fields.title, "Solar Drones");
    assert_eq!(h.pitches.list("alice").await.unwrap().len(), 1);
}

// ============================================================================
// Authoritative failure is fatal
// ============================================================================

#[tokio::test]
async fn test_store_failure_skips_side_writes() {
    let h = harness();
    h.pitches.fail_inserts(true);

    let result = h.state.persistence().create_pitch("alice", &draft()).await;

    assert!(matches!(result, Err(AppError::Database(_))));
    assert_eq!(h.analytics.attempts(), 0, "analytics must not be attempted");
    assert!(
        h.workflow.calls_to(ANALYTICS_WORKFLOW).is_empty(),
        "notification must not be attempted"
    );
}

#[tokio::test]
async fn test_invalid_draft_writes_nothing() {
    let h = harness();
    let draft = NewPitch::new(PitchFields {
        title: "   ".to_string(),
        ..Default::default()
    });

    let result = h.state.persistence().create_pitch("alice", &draft).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(h.pitches.list("alice").await.unwrap().is_empty());
    assert_eq!(h.analytics.attempts(), 0);
}
