//! Pitch Repository Integration Tests
//!
//! Verifies owner-scoped CRUD over the SQLite store: isolation between
//! owners, most-recently-updated ordering, merge updates, and durability
//! across reopening the database file.

use pitch_writer::models::pitch::NewPitch;
use pitch_writer::services::repository::PitchRepository;
use pitch_writer::storage::Database;
use pitch_writer::AppError;
use pitch_writer_core::{PitchFields, PitchPatch, PitchStatus};
use tempfile::TempDir;

fn titled(title: &str) -> NewPitch {
    NewPitch::new(PitchFields {
        title: title.to_string(),
        ..Default::default()
    })
}

fn patch_title(title: &str) -> PitchPatch {
    PitchPatch {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Ownership
// ============================================================================

#[tokio::test]
async fn test_owners_never_see_each_other() {
    let db = Database::new_in_memory().unwrap();
    let alice = db.insert("alice", &titled("Alice's pitch")).await.unwrap();
    let bob = db.insert("bob", &titled("Bob's pitch")).await.unwrap();

    let listed = db.list("alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, alice.id);

    assert!(matches!(db.get("alice", &bob.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(
        db.update("alice", &bob.id, &patch_title("Hijacked")).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(db.delete("alice", &bob.id).await, Err(AppError::NotFound(_))));

    let untouched = db.get("bob", &bob.id).await.unwrap();
    assert_eq!(untouched.fields.title, "Bob's pitch");
}

#[tokio::test]
async fn test_unknown_owner_has_empty_list() {
    let db = Database::new_in_memory().unwrap();
    db.insert("alice", &titled("One")).await.unwrap();
    assert!(db.list("carol").await.unwrap().is_empty());
}

// ============================================================================
// Ordering and timestamps
// ============================================================================

#[tokio::test]
async fn test_list_orders_by_last_update() {
    let db = Database::new_in_memory().unwrap();
    let first = db.insert("alice", &titled("First")).await.unwrap();
    let second = db.insert("alice", &titled("Second")).await.unwrap();
    let third = db.insert("alice", &titled("Third")).await.unwrap();

    let ids: Vec<String> = db.list("alice").await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id.clone(), second.id.clone(), first.id.clone()]);

    db.update("alice", &first.id, &patch_title("First, revised"))
        .await
        .unwrap();

    let ids: Vec<String> = db.list("alice").await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, third.id, second.id]);
}

#[tokio::test]
async fn test_empty_patch_still_bumps_updated_at() {
    let db = Database::new_in_memory().unwrap();
    let created = db.insert("alice", &titled("Stable")).await.unwrap();

    let updated = db
        .update("alice", &created.id, &PitchPatch::default())
        .await
        .unwrap();

    assert_eq!(updated.fields, created.fields);
    assert_eq!(updated.created_at, created.created_at);
    assert!(
        updated.updated_at > created.updated_at,
        "{} should be after {}",
        updated.updated_at,
        created.updated_at
    );
}

#[tokio::test]
async fn test_ids_are_unique() {
    let db = Database::new_in_memory().unwrap();
    let mut ids = std::collections::HashSet::new();
    for i in 0..20 {
        let pitch = db.insert("alice", &titled(&format!("Pitch {}", i))).await.unwrap();
        assert!(ids.insert(pitch.id));
    }
}

// ============================================================================
// Updates
// ============================================================================

#[tokio::test]
async fn test_update_merges_only_present_fields() {
    let db = Database::new_in_memory().unwrap();
    let created = db
        .insert(
            "alice",
            &NewPitch::new(PitchFields {
                title: "Solar Drones".to_string(),
                problem: "Outages".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    let patch = PitchPatch {
        solution: Some("Batteries by air".to_string()),
        status: Some(PitchStatus::Completed),
        ..Default::default()
    };
    let updated = db.update("alice", &created.id, &patch).await.unwrap();

    assert_eq!(updated.fields.title, "Solar Drones");
    assert_eq!(updated.fields.problem, "Outages");
    assert_eq!(updated.fields.solution, "Batteries by air");
    assert_eq!(updated.status, PitchStatus::Completed);
    assert_eq!(db.get("alice", &created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_cannot_blank_the_title() {
    let db = Database::new_in_memory().unwrap();
    let created = db.insert("alice", &titled("Keep me")).await.unwrap();

    let result = db.update("alice", &created.id, &patch_title("  ")).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(db.get("alice", &created.id).await.unwrap().fields.title, "Keep me");
}

#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let db = Database::new_in_memory().unwrap();
    let created = db.insert("alice", &titled("Short-lived")).await.unwrap();

    db.delete("alice", &created.id).await.unwrap();

    assert!(matches!(db.get("alice", &created.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(db.delete("alice", &created.id).await, Err(AppError::NotFound(_))));
}

// ============================================================================
// Durability
// ============================================================================

#[tokio::test]
async fn test_pitches_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("pitches.db");

    let id = {
        let db = Database::open(&path).unwrap();
        db.insert("alice", &titled("Durable")).await.unwrap().id
    };

    let db = Database::open(&path).unwrap();
    let pitch = db.get("alice", &id).await.unwrap();
    assert_eq!(pitch.fields.title, "Durable");
    assert_eq!(pitch.status, PitchStatus::Draft);
}
