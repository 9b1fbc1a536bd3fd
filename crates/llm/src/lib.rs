//! Pitch Writer LLM
//!
//! Provides a unified, single-shot text completion interface over AI providers:
//! - Google Gemini (`generateContent`)
//! - OpenAI and OpenAI-compatible chat completion endpoints
//!
//! Also includes the proxy- and timeout-aware HTTP client factory.

pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::{create_provider, TextProvider};
pub use types::*;
