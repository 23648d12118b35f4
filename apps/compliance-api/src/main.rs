//! Compliance Review Server
//!
//! Analyzes legal and policy documents against regulatory regimes and routes
//! them through lawyer review. Provides REST API endpoints for:
//!
//! - Document submission (analysis + lawyer assignment)
//! - Role-scoped document listing
//! - Review status updates
//! - Regulation catalog and lawyer listing
//!
//! ## Architecture
//!
//! Handlers are thin. The pipeline lives in `compliance-engine`, wired here
//! to in-memory collaborators. Callers identify themselves with the
//! `x-user-id` and `x-user-role` headers.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    routing::{get, patch},
    Router,
};
use clap::Parser;
use compliance_engine::config::{
    AiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_MAX_OUTPUT_TOKENS,
};
use compliance_engine::ComplianceEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_create_document, handle_get_document, handle_health, handle_list_documents,
    handle_list_lawyers, handle_list_regulations, handle_update_status,
};
pub use state::AppState;

/// Command-line arguments for the compliance server
#[derive(Parser, Debug)]
#[command(name = "compliance-api")]
#[command(about = "Compliance analysis and legal review server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Gemini API key; AI analysis is disabled without one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    gemini_endpoint: String,

    /// AI analysis timeout in milliseconds
    #[arg(long, env = "AI_TIMEOUT_MS", default_value = "30000")]
    ai_timeout_ms: u64,

    /// JSON file with the user directory seed
    #[arg(long, env = "USERS_FILE")]
    users: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn ai_config(&self) -> AiConfig {
        AiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            endpoint: self.gemini_endpoint.clone(),
            timeout_ms: self.ai_timeout_ms,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Build the router over shared state
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Reference data
        .route("/api/regulations", get(handle_list_regulations))
        .route("/api/lawyers", get(handle_list_lawyers))
        // Documents
        .route(
            "/api/documents",
            get(handle_list_documents).post(handle_create_document),
        )
        .route("/api/documents/:id", get(handle_get_document))
        .route("/api/documents/:id/status", patch(handle_update_status))
        // Apply middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting compliance server on {}:{}", args.host, args.port);

    let engine = ComplianceEngine::from_config(&args.ai_config());
    let users = state::load_users(args.users.as_deref())?;
    let state = AppState::new(engine, users);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("AI timeout: {}ms", args.ai_timeout_ms);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
