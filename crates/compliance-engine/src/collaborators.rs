//! Seams to persistence, identity and eventing
//!
//! The pipeline only needs these contracts; storage engines and message
//! buses plug in behind them. In-memory versions live in [`crate::memory`].

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{ComplianceDocument, Role, User};
use thiserror::Error;

use crate::workflow::{Actor, ReviewUpdate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Event publish failed: {0}")]
    Unavailable(String),
}

/// Which documents a caller may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentScope {
    All,
    CreatedBy(String),
    AssignedTo(String),
}

impl DocumentScope {
    /// Clients see their own submissions, lawyers their assignments, admins everything
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.role {
            Role::Client => DocumentScope::CreatedBy(actor.user_id.clone()),
            Role::Lawyer => DocumentScope::AssignedTo(actor.user_id.clone()),
            Role::Admin => DocumentScope::All,
        }
    }

    pub fn admits(&self, doc: &ComplianceDocument) -> bool {
        match self {
            DocumentScope::All => true,
            DocumentScope::CreatedBy(id) => doc.created_by == *id,
            DocumentScope::AssignedTo(id) => doc.assigned_lawyer.as_deref() == Some(id.as_str()),
        }
    }
}

/// Document persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, doc: ComplianceDocument) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<ComplianceDocument>, StoreError>;

    /// Apply a review update to the stored record as one atomic step and
    /// return the result; `NotFound` if the id is unknown
    async fn apply_review(
        &self,
        id: &str,
        update: &ReviewUpdate,
    ) -> Result<ComplianceDocument, StoreError>;

    /// Documents in scope, newest first
    async fn list(&self, scope: &DocumentScope) -> Result<Vec<ComplianceDocument>, StoreError>;
}

/// Read-only user lookup
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// All lawyers in directory order
    async fn lawyers(&self) -> Result<Vec<User>, StoreError>;
}

/// Best-effort event sink
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, name: &str, payload: Value) -> Result<(), PublishError>;
}
