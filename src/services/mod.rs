//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod ai;
pub mod analytics;
pub mod auth;
pub mod export;
pub mod fallback;
pub mod notification;
pub mod persistence;
pub mod prompt;
pub mod repository;
pub mod workflow;

pub use ai::{EnhancementGateway, GenerationGateway, Summarizer};
pub use analytics::{AnalyticsService, AnalyticsStore};
pub use auth::{Authenticator, SessionAuthenticator};
pub use notification::{NotificationChannel, WorkflowNotifier};
pub use persistence::PersistenceCoordinator;
pub use repository::PitchRepository;
pub use workflow::{N8nClient, WorkflowBackend};
