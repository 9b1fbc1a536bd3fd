//! Application State
//!
//! Holds every service a command needs. Built once at startup and shared
//! behind an `Arc` by concurrent requests.

use std::sync::Arc;
use std::time::Duration;

use pitch_writer_llm::{build_http_client, create_provider, TextProvider};
use tracing::info;

use crate::models::response::HealthResponse;
use crate::models::settings::AppConfig;
use crate::services::ai::{EnhancementGateway, GenerationGateway, Summarizer};
use crate::services::analytics::{AnalyticsService, AnalyticsStore};
use crate::services::auth::{Authenticator, SessionAuthenticator};
use crate::services::notification::{NotificationChannel, WorkflowNotifier};
use crate::services::persistence::PersistenceCoordinator;
use crate::services::repository::PitchRepository;
use crate::services::workflow::{N8nClient, WorkflowBackend};
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

/// External collaborators the state is assembled from
pub struct Collaborators {
    pub provider: Arc<dyn TextProvider>,
    pub workflow: Arc<dyn WorkflowBackend>,
    pub authenticator: Arc<dyn Authenticator>,
    pub pitches: Arc<dyn PitchRepository>,
    pub analytics: Arc<dyn AnalyticsStore>,
    pub notifier: Arc<dyn NotificationChannel>,
}

/// Application state shared by all commands
pub struct AppState {
    config: AppConfig,
    authenticator: Arc<dyn Authenticator>,
    pitches: Arc<dyn PitchRepository>,
    analytics: Arc<dyn AnalyticsStore>,
    generation: GenerationGateway,
    enhancement: EnhancementGateway,
    summarizer: Summarizer,
    persistence: PersistenceCoordinator,
}

impl AppState {
    /// Assemble state from explicit collaborators
    pub fn new(config: AppConfig, parts: Collaborators) -> Self {
        let generation = GenerationGateway::new(
            Arc::clone(&parts.workflow),
            config.workflow.generation_workflow.clone(),
            Arc::clone(&parts.provider),
        );
        let persistence = PersistenceCoordinator::new(
            Arc::clone(&parts.pitches),
            Arc::clone(&parts.analytics),
            parts.notifier,
        );

        Self {
            generation,
            enhancement: EnhancementGateway::new(Arc::clone(&parts.provider)),
            summarizer: Summarizer::new(parts.provider),
            persistence,
            authenticator: parts.authenticator,
            pitches: parts.pitches,
            analytics: parts.analytics,
            config,
        }
    }

    /// Open the databases and build the production clients
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;

        let db_path = config.storage.resolve_database_path()?;
        let database = Database::open(&db_path)?;
        info!("Opened pitch database at {}", db_path.display());

        let analytics_path = config.storage.resolve_analytics_path()?;
        let analytics = AnalyticsService::open(&analytics_path)?;
        info!("Opened analytics database at {}", analytics_path.display());

        let client = build_http_client(
            config.http.proxy.as_ref(),
            Some(Duration::from_secs(config.http.request_timeout_secs)),
        )?;

        let provider = create_provider(config.provider.clone(), client.clone());
        let workflow: Arc<dyn WorkflowBackend> = Arc::new(N8nClient::new(&config.workflow, client));
        let notifier = Arc::new(WorkflowNotifier::new(
            Arc::clone(&workflow),
            config.workflow.analytics_workflow.clone(),
        ));

        info!(
            "Using {} provider ({}) with workflow backend {}",
            provider.name(),
            provider.model(),
            config.workflow.base_url
        );

        let parts = Collaborators {
            provider,
            workflow,
            authenticator: Arc::new(SessionAuthenticator::new(database.clone())),
            pitches: Arc::new(database),
            analytics: Arc::new(analytics),
            notifier,
        };
        Ok(Self::new(config, parts))
    }

    /// Resolve a session token to its user id
    pub async fn authenticate(&self, token: &str) -> AppResult<String> {
        self.authenticator.authenticate(token).await
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pitches(&self) -> &dyn PitchRepository {
        self.pitches.as_ref()
    }

    pub fn analytics(&self) -> &dyn AnalyticsStore {
        self.analytics.as_ref()
    }

    pub fn generation(&self) -> &GenerationGateway {
        &self.generation
    }

    pub fn enhancement(&self) -> &EnhancementGateway {
        &self.enhancement
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn persistence(&self) -> &PersistenceCoordinator {
        &self.persistence
    }

    /// Snapshot of store and config health
    pub fn health(&self) -> HealthResponse {
        let database = self.pitches.is_healthy();
        let analytics = self.analytics.is_healthy();
        let config = self.config.validate().is_ok();
        HealthResponse {
            status: if database && config {
                "healthy".to_string()
            } else {
                "degraded".to_string()
            },
            database,
            analytics,
            config,
            ..Default::default()
        }
    }
}
