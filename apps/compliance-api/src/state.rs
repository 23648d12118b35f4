//! Application state for the compliance API

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use compliance_engine::memory::{AuditTrailPublisher, InMemoryDocumentStore, InMemoryUserDirectory};
use compliance_engine::{ComplianceEngine, ComplianceService};
use shared_types::User;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: ComplianceService,
}

impl AppState {
    /// Wire the engine to in-memory collaborators
    pub fn new(engine: ComplianceEngine, users: Vec<User>) -> Self {
        let service = ComplianceService::new(
            engine,
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(InMemoryUserDirectory::new(users)),
            Arc::new(AuditTrailPublisher::new()),
        );
        Self { service }
    }
}

/// Read the user directory seed, a JSON array of users
pub fn load_users(path: Option<&Path>) -> Result<Vec<User>> {
    let Some(path) = path else {
        warn!("No user seed file given, the user directory is empty");
        return Ok(Vec::new());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading user seed {}", path.display()))?;
    let users: Vec<User> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing user seed {}", path.display()))?;

    let lawyers = users.iter().filter(|u| u.is_lawyer()).count();
    info!("Loaded {} users ({} lawyers)", users.len(), lawyers);
    Ok(users)
}
