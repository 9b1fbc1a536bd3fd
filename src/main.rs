//! Pitch Writer - command line entry point
//!
//! `serve` reads one JSON command per line on stdin and writes one JSON
//! reply per line on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitch_writer::services::auth::SessionAuthenticator;
use pitch_writer::storage::{ConfigService, Database};
use pitch_writer::{serve, AppState, SettingsUpdate};
use pitch_writer_llm::ProviderType;

#[derive(Parser)]
#[command(name = "pitch-writer", version, about = "Pitch Writer backend")]
struct Cli {
    /// Config file (defaults to ~/.pitch-writer/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve JSON-line commands on stdin/stdout
    Serve,
    /// Create a session token for a user and print it
    IssueSession {
        #[arg(long)]
        user: String,
    },
    /// Invalidate a session token
    RevokeSession {
        #[arg(long)]
        token: String,
    },
    /// Update the config file and print the result
    Configure {
        /// AI provider (gemini or openai)
        #[arg(long, value_parser = parse_provider)]
        provider: Option<ProviderType>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        temperature: Option<f32>,
        /// Workflow backend base URL
        #[arg(long)]
        workflow_url: Option<String>,
        /// Request timeout in seconds for outbound HTTP calls
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn parse_provider(s: &str) -> Result<ProviderType, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown provider: {}", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitch_writer=info,pitch_writer_llm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config_service = match cli.config {
        Some(ref path) => ConfigService::open(path),
        None => ConfigService::new(),
    }
    .context("failed to load configuration")?;
    let config = config_service.resolved_config();

    match cli.command {
        Commands::Serve => {
            let state = AppState::initialize(config).context("failed to initialize backend")?;
            info!("Serving commands on stdin");
            serve(
                Arc::new(state),
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
            info!("stdin closed, shutting down");
            Ok(())
        }
        Commands::IssueSession { user } => {
            let db = Database::open(&config.storage.resolve_database_path()?)?;
            let token = SessionAuthenticator::new(db).issue_session(&user)?;
            println!("{}", token);
            Ok(())
        }
        Commands::RevokeSession { token } => {
            let db = Database::open(&config.storage.resolve_database_path()?)?;
            if !SessionAuthenticator::new(db).revoke_session(&token)? {
                warn!("Session token was not found");
            }
            Ok(())
        }
        Commands::Configure {
            provider,
            model,
            temperature,
            workflow_url,
            timeout,
        } => {
            let updated = config_service.update_config(SettingsUpdate {
                provider,
                model,
                temperature,
                workflow_base_url: workflow_url,
                request_timeout_secs: timeout,
            })?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
    }
}
