//! Command Dispatch Integration Tests
//!
//! Drives named commands through `dispatch` the way the stdio bridge does
//! and checks the response envelope: authentication, not-found and generic
//! failure messages, argument handling, and a full pitch lifecycle.

use pitch_writer::services::workflow::WorkflowResponse;
use pitch_writer::{dispatch, CommandRequest};
use serde_json::{json, Value};

use crate::fakes::{Harness, ScriptedProvider, ANALYTICS_WORKFLOW};

fn request(command: &str, token: &str, args: Value) -> CommandRequest {
    serde_json::from_value(json!({
        "command": command,
        "token": token,
        "args": args,
    }))
    .unwrap()
}

async fn call(h: &Harness, command: &str, token: &str, args: Value) -> Value {
    dispatch(&h.state, request(command, token, args)).await.response
}

async fn create(h: &Harness, token: &str, title: &str) -> String {
    let response = call(h, "create_pitch", token, json!({ "title": title })).await;
    assert_eq!(response["success"], true, "{}", response);
    response["data"]["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_every_command_but_health_requires_a_session() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let commands = [
        ("generate_content", json!({ "prompt": "Write" })),
        ("generate_field", json!({ "field": "problem", "pitch": { "title": "T" } })),
        ("enhance_content", json!({ "content": "Text" })),
        ("generate_summary", json!({ "pitch": { "title": "T" } })),
        ("list_pitches", Value::Null),
        ("get_pitch", json!({ "id": "x" })),
        ("create_pitch", json!({ "title": "T" })),
        ("update_pitch", json!({ "id": "x", "title": "T2" })),
        ("delete_pitch", json!({ "id": "x" })),
        ("export_pitch", json!({ "id": "x" })),
        ("get_analytics", Value::Null),
    ];

    for token in ["", "not-a-session"] {
        for (command, args) in &commands {
            let response = call(&h, command, token, args.clone()).await;
            assert_eq!(response["success"], false, "{} should fail", command);
            assert_eq!(response["error"], "Unauthorized", "{}", command);
            assert_eq!(response["error_kind"], "unauthorized", "{}", command);
            assert!(response["data"].is_null());
        }
    }

    assert_eq!(h.provider.call_count(), 0, "no AI work for unauthenticated callers");
    assert_eq!(h.analytics.attempts(), 0);
}

#[tokio::test]
async fn test_health_needs_no_session() {
    let h = Harness::new(ScriptedProvider::replying("text"));

    let response = call(&h, "get_health", "", Value::Null).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["status"], "healthy");
    assert_eq!(response["data"]["service"], "pitch-writer");
    assert_eq!(response["data"]["database"], true);
}

// ============================================================================
// Pitch lifecycle
// ============================================================================

#[tokio::test]
async fn test_pitch_lifecycle() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    h.workflow
        .respond(ANALYTICS_WORKFLOW, WorkflowResponse::ok(json!({})));
    let token = h.login("alice");

    let created = call(
        &h,
        "create_pitch",
        &token,
        json!({ "title": "Solar Drones", "type": "startup", "problem": "Outages" }),
    )
    .await;
    assert_eq!(created["success"], true);
    let data = &created["data"];
    let id = data["id"].as_str().unwrap().to_string();
    assert_eq!(data["user_id"], "alice");
    assert_eq!(data["type"], "startup");
    assert_eq!(data["status"], "draft");
    assert_eq!(data["solution"], "");

    let fetched = call(&h, "get_pitch", &token, json!({ "id": id })).await;
    assert_eq!(fetched["data"], created["data"]);

    let updated = call(
        &h,
        "update_pitch",
        &token,
        json!({ "id": id, "solution": "Batteries by air", "status": "completed" }),
    )
    .await;
    assert_eq!(updated["success"], true);
    assert_eq!(updated["data"]["problem"], "Outages");
    assert_eq!(updated["data"]["solution"], "Batteries by air");
    assert_eq!(updated["data"]["status"], "completed");

    let exported = call(&h, "export_pitch", &token, json!({ "id": id })).await;
    assert_eq!(exported["data"]["filename"], "solar_drones.md");
    let markdown = exported["data"]["content"].as_str().unwrap();
    assert!(markdown.starts_with("# Solar Drones\n"));
    assert!(markdown.contains("## Solution"));

    let listed = call(&h, "list_pitches", &token, Value::Null).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let deleted = call(&h, "delete_pitch", &token, json!({ "id": id })).await;
    assert_eq!(deleted["success"], true);

    let gone = call(&h, "get_pitch", &token, json!({ "id": id })).await;
    assert_eq!(gone["error"], "Pitch not found");
    assert_eq!(gone["error_kind"], "not_found");
}

#[tokio::test]
async fn test_foreign_pitch_looks_missing() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let alice = h.login("alice");
    let bob = h.login("bob");
    let id = create(&h, &alice, "Alice's pitch").await;

    for command in ["get_pitch", "delete_pitch", "export_pitch"] {
        let response = call(&h, command, &bob, json!({ "id": id })).await;
        assert_eq!(response["error_kind"], "not_found", "{}", command);
        assert_eq!(response["error"], "Pitch not found", "{}", command);
    }
    let response = call(&h, "update_pitch", &bob, json!({ "id": id, "title": "Mine" })).await;
    assert_eq!(response["error_kind"], "not_found");

    let still_there = call(&h, "get_pitch", &alice, json!({ "id": id })).await;
    assert_eq!(still_there["data"]["title"], "Alice's pitch");
}

#[tokio::test]
async fn test_store_failure_uses_generic_message() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    h.pitches.fail_inserts(true);
    let token = h.login("alice");

    let response = call(&h, "create_pitch", &token, json!({ "title": "Doomed" })).await;

    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Failed to create pitch");
    assert_eq!(response["error_kind"], "failure");
    assert!(!response.to_string().contains("/var/lib"), "internal detail leaked");
}

// ============================================================================
// AI commands
// ============================================================================

#[tokio::test]
async fn test_generate_content_falls_back_and_hides_errors() {
    let h = Harness::new(ScriptedProvider::failing());
    let token = h.login("alice");

    let response = call(&h, "generate_content", &token, json!({ "prompt": "Write" })).await;

    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Failed to generate content");
    assert!(!response.to_string().contains("/internal/path"));
}

#[tokio::test]
async fn test_enhance_with_unknown_style_uses_formal() {
    let h = Harness::new(ScriptedProvider::replying("Polished."));
    let token = h.login("alice");

    let response = call(
        &h,
        "enhance_content",
        &token,
        json!({ "content": "we make drones", "style": "pirate" }),
    )
    .await;

    assert_eq!(response["data"]["enhancedContent"], "Polished.");
    let prompt = &h.provider.prompts()[0];
    assert!(prompt.starts_with("Rewrite this content in a formal, professional tone"));
    assert!(prompt.contains("we make drones"));
}

#[tokio::test]
async fn test_generate_summary_accepts_pitch_data_alias() {
    let h = Harness::new(ScriptedProvider::replying("Summary."));
    let token = h.login("alice");

    let response = call(
        &h,
        "generate_summary",
        &token,
        json!({ "pitchData": { "title": "Solar Drones" } }),
    )
    .await;

    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["oneLiner"], "Summary.");
    assert_eq!(response["data"]["elevator"], "Summary.");
    assert_eq!(response["data"]["oneMinute"], "Summary.");
    assert_eq!(h.provider.call_count(), 3);
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_analytics_reflect_created_pitches() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let token = h.login("alice");
    let other = h.login("bob");

    call(&h, "create_pitch", &token, json!({ "title": "One two", "type": "startup" })).await;
    call(&h, "create_pitch", &token, json!({ "title": "Three four five six", "type": "startup" })).await;
    call(&h, "create_pitch", &other, json!({ "title": "Not counted" })).await;

    let response = call(&h, "get_analytics", &token, Value::Null).await;

    assert_eq!(response["success"], true);
    let stats = &response["data"];
    assert_eq!(stats["totalPitches"], 2);
    assert_eq!(stats["pitchTypes"]["startup"], 2);
    assert_eq!(stats["audienceTypes"]["unspecified"], 2);
    assert_eq!(stats["averageWordCount"], 4.0);
    assert_eq!(stats["createdThisMonth"], 2);
}

// ============================================================================
// Envelope handling
// ============================================================================

#[tokio::test]
async fn test_unknown_command() {
    let h = Harness::new(ScriptedProvider::replying("text"));

    let response = call(&h, "launch_rocket", "", Value::Null).await;

    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Unknown command: launch_rocket");
}

#[tokio::test]
async fn test_invalid_arguments() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let token = h.login("alice");

    let response = call(&h, "get_pitch", &token, json!({ "identifier": 3 })).await;
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Invalid arguments");

    let response = call(&h, "generate_field", &token, json!({ "field": "slogan" })).await;
    assert_eq!(response["error"], "Invalid arguments");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let req: CommandRequest = serde_json::from_value(json!({
        "id": 17,
        "command": "get_health",
    }))
    .unwrap();

    let reply = dispatch(&h.state, req).await;
    let wire = serde_json::to_value(&reply).unwrap();

    assert_eq!(wire["id"], 17);
    assert_eq!(wire["response"]["success"], true);
}
