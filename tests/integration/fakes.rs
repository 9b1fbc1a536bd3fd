//! Test doubles and a fully wired test harness.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pitch_writer::models::analytics::AnalyticsRecord;
use pitch_writer::models::pitch::{NewPitch, PitchRecord};
use pitch_writer::models::settings::AppConfig;
use pitch_writer::services::analytics::{AnalyticsService, AnalyticsStore};
use pitch_writer::services::auth::SessionAuthenticator;
use pitch_writer::services::notification::WorkflowNotifier;
use pitch_writer::services::repository::PitchRepository;
use pitch_writer::services::workflow::{WorkflowBackend, WorkflowResponse};
use pitch_writer::storage::Database;
use pitch_writer::{AppError, AppResult, AppState, Collaborators};
use pitch_writer_core::PitchPatch;
use pitch_writer_llm::{LlmError, LlmResult, TextProvider};
use serde_json::Value;

pub const GENERATION_WORKFLOW: &str = "ai-content-generation";
pub const ANALYTICS_WORKFLOW: &str = "analytics-tracker";

// ============================================================================
// Workflow backend
// ============================================================================

/// Workflow backend answering from a per-workflow script.
/// Unscripted workflows fail as if the backend were unreachable.
#[derive(Default)]
pub struct ScriptedWorkflow {
    responses: Mutex<HashMap<String, WorkflowResponse>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedWorkflow {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, workflow: &str, response: WorkflowResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(workflow.to_string(), response);
    }

    pub fn calls_to(&self, workflow: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == workflow)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl WorkflowBackend for ScriptedWorkflow {
    async fn invoke(&self, workflow: &str, payload: Value) -> WorkflowResponse {
        self.calls
            .lock()
            .unwrap()
            .push((workflow.to_string(), payload));
        self.responses
            .lock()
            .unwrap()
            .get(workflow)
            .cloned()
            .unwrap_or_else(|| WorkflowResponse::failed("connection refused"))
    }
}

// ============================================================================
// AI provider
// ============================================================================

type Script = Box<dyn Fn(&str) -> (Duration, LlmResult<String>) + Send + Sync>;

/// Provider whose reply (and latency) is a function of the prompt
pub struct ScriptedProvider {
    script: Script,
    prompts: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedProvider {
    pub fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&str) -> (Duration, LlmResult<String>) + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            prompts: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::new(move |_| (Duration::ZERO, Ok(text.clone())))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(|_| {
            (
                Duration::ZERO,
                Err(LlmError::ServerError {
                    message: "upstream exploded at /internal/path".to_string(),
                    status: Some(500),
                }),
            )
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Most calls ever in flight at once
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Calls that ran to completion (not dropped mid-flight)
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = ActiveGuard(&self.active);

        let (delay, reply) = (self.script)(prompt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        reply
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Real SQLite pitch store whose inserts can be made to fail
pub struct FlakyPitchStore {
    inner: Database,
    fail_inserts: AtomicBool,
}

impl FlakyPitchStore {
    pub fn new(inner: Database) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_inserts: AtomicBool::new(false),
        })
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PitchRepository for FlakyPitchStore {
    async fn list(&self, owner: &str) -> AppResult<Vec<PitchRecord>> {
        self.inner.list(owner).await
    }

    async fn get(&self, owner: &str, id: &str) -> AppResult<PitchRecord> {
        self.inner.get(owner, id).await
    }

    async fn insert(&self, owner: &str, draft: &NewPitch) -> AppResult<PitchRecord> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::database("disk I/O error at /var/lib/pitches.db"));
        }
        self.inner.insert(owner, draft).await
    }

    async fn update(&self, owner: &str, id: &str, patch: &PitchPatch) -> AppResult<PitchRecord> {
        self.inner.update(owner, id, patch).await
    }

    async fn delete(&self, owner: &str, id: &str) -> AppResult<()> {
        self.inner.delete(owner, id).await
    }
}

/// Real analytics store whose inserts can be made to fail
pub struct FlakyAnalytics {
    inner: AnalyticsService,
    fail_inserts: AtomicBool,
    attempts: AtomicUsize,
}

impl FlakyAnalytics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: AnalyticsService::new_in_memory().unwrap(),
            fail_inserts: AtomicBool::new(false),
            attempts: AtomicUsize::new(0),
        })
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalyticsStore for FlakyAnalytics {
    async fn insert(&self, record: &AnalyticsRecord) -> AppResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::database("analytics store offline"));
        }
        self.inner.insert(record).await
    }

    async fn list_for_owner(&self, user_id: &str) -> AppResult<Vec<AnalyticsRecord>> {
        self.inner.list_for_owner(user_id).await
    }
}

// ============================================================================
// Harness
// ============================================================================

/// An `AppState` wired to test doubles, plus handles to inspect them
pub struct Harness {
    pub state: AppState,
    pub auth: SessionAuthenticator,
    pub pitches: Arc<FlakyPitchStore>,
    pub analytics: Arc<FlakyAnalytics>,
    pub workflow: Arc<ScriptedWorkflow>,
    pub provider: Arc<ScriptedProvider>,
}

impl Harness {
    pub fn new(provider: Arc<ScriptedProvider>) -> Self {
        Self::with_workflow(ScriptedWorkflow::new(), provider)
    }

    pub fn with_workflow(workflow: Arc<ScriptedWorkflow>, provider: Arc<ScriptedProvider>) -> Self {
        let db = Database::new_in_memory().unwrap();
        let auth = SessionAuthenticator::new(db.clone());
        let pitches = FlakyPitchStore::new(db);
        let analytics = FlakyAnalytics::new();
        let notifier = Arc::new(WorkflowNotifier::new(workflow.clone(), ANALYTICS_WORKFLOW));

        let parts = Collaborators {
            provider: provider.clone(),
            workflow: workflow.clone(),
            authenticator: Arc::new(auth.clone()),
            pitches: pitches.clone(),
            analytics: analytics.clone(),
            notifier,
        };

        Self {
            state: AppState::new(AppConfig::default(), parts),
            auth,
            pitches,
            analytics,
            workflow,
            provider,
        }
    }

    /// Issue a session token for `user`
    pub fn login(&self, user: &str) -> String {
        self.auth.issue_session(user).unwrap()
    }
}
