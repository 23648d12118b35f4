//! In-memory collaborators

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{AuditEvent, AuditTrail, ComplianceDocument, User};
use tokio::sync::RwLock;
use tracing::info;

use crate::collaborators::{
    DocumentScope, DocumentStore, EventPublisher, PublishError, StoreError, UserDirectory,
};
use crate::workflow::ReviewUpdate;

/// Documents kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<ComplianceDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, doc: ComplianceDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| d.id == doc.id) {
            return Err(StoreError::Backend(format!("duplicate document id {}", doc.id)));
        }
        documents.push(doc);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ComplianceDocument>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn apply_review(
        &self,
        id: &str,
        update: &ReviewUpdate,
    ) -> Result<ComplianceDocument, StoreError> {
        let mut documents = self.documents.write().await;
        let slot = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply_to(slot);
        Ok(slot.clone())
    }

    async fn list(&self, scope: &DocumentScope) -> Result<Vec<ComplianceDocument>, StoreError> {
        let documents = self.documents.read().await;
        // Later inserts first so equal timestamps still come out newest first
        let mut matching: Vec<ComplianceDocument> = documents
            .iter()
            .rev()
            .filter(|d| scope.admits(d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

/// Fixed user list, typically seeded at startup
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<User>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn lawyers(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.iter().filter(|u| u.is_lawyer()).cloned().collect())
    }
}

/// Publisher that records every event in an audit trail
#[derive(Debug, Default)]
pub struct AuditTrailPublisher {
    trail: RwLock<AuditTrail>,
}

impl AuditTrailPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.trail.read().await.events.clone()
    }

    pub async fn events_for(&self, document_id: &str) -> Vec<AuditEvent> {
        self.trail
            .read()
            .await
            .for_document(document_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventPublisher for AuditTrailPublisher {
    async fn publish(&self, name: &str, payload: Value) -> Result<(), PublishError> {
        let event = AuditEvent::new(name, payload);
        info!(
            "Event {} ({}) for {}",
            event.name,
            event.event_id,
            event.document_id.as_deref().unwrap_or("-")
        );
        self.trail.write().await.append(event);
        Ok(())
    }
}
