//! AI Operations
//!
//! Generation (with workflow fallback), enhancement and summarization.

pub mod enhancement;
pub mod generation;
pub mod summarizer;

pub use enhancement::EnhancementGateway;
pub use generation::{GenerationGateway, ProviderStrategy, WorkflowStrategy};
pub use summarizer::Summarizer;
