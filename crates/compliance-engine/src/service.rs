//! Submission and review pipeline over the collaborator seams

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use shared_types::{ComplianceDocument, Role, User, DOCUMENT_UPLOADED};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::collaborators::{DocumentScope, DocumentStore, EventPublisher, StoreError, UserDirectory};
use crate::error::WorkflowError;
use crate::submission::SubmissionRequest;
use crate::workflow::{authorize, parse_status, Actor, ReviewUpdate};
use crate::ComplianceEngine;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::Backend(msg) => ServiceError::Storage(msg),
        }
    }
}

/// The document pipeline wired to its collaborators
#[derive(Clone)]
pub struct ComplianceService {
    engine: ComplianceEngine,
    documents: Arc<dyn DocumentStore>,
    users: Arc<dyn UserDirectory>,
    events: Arc<dyn EventPublisher>,
}

impl ComplianceService {
    pub fn new(
        engine: ComplianceEngine,
        documents: Arc<dyn DocumentStore>,
        users: Arc<dyn UserDirectory>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            engine,
            documents,
            users,
            events,
        }
    }

    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }

    /// Resolve the caller. The user must exist; a claimed role must match.
    pub async fn identify(
        &self,
        user_id: &str,
        claimed_role: Option<Role>,
    ) -> Result<Actor, ServiceError> {
        let user = self
            .users
            .find(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthenticated(format!("unknown user {}", user_id)))?;

        if claimed_role.is_some_and(|role| role != user.role) {
            return Err(ServiceError::Unauthenticated(format!(
                "role does not match user {}",
                user_id
            )));
        }

        Ok(Actor::new(user.id, user.role))
    }

    pub async fn lawyers(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.lawyers().await?)
    }

    /// Validate, analyze, assign, persist, announce.
    ///
    /// Analysis never fails the submission. Assignment lookups are
    /// best-effort; the upload event is published on a background task so a
    /// slow or failing publisher never holds up the response.
    pub async fn submit(
        &self,
        request: SubmissionRequest,
        creator: &Actor,
    ) -> Result<ComplianceDocument, ServiceError> {
        let valid = request.validate()?;

        let mut doc = ComplianceDocument::new(
            Uuid::new_v4().to_string(),
            valid.document_name,
            valid.document_type,
            valid.regulations,
            valid.content,
            creator.user_id.clone(),
        );

        let analysis = self.engine.analyze(&doc).await;
        doc.apply_analysis(&analysis);

        match self.users.lawyers().await {
            Ok(lawyers) => {
                if let Some(lawyer) = self.engine.resolve_assignment(&lawyers, &doc.regulations) {
                    doc.assign_to(&lawyer.id);
                }
            }
            Err(e) => warn!("Lawyer lookup failed, leaving {} unassigned: {}", doc.id, e),
        }

        self.documents.insert(doc.clone()).await?;

        info!(
            "Document {} submitted: score={}, risk={}, violations={}, lawyer={}",
            doc.id,
            doc.compliance_score,
            doc.risk_level,
            doc.violations.len(),
            doc.assigned_lawyer.as_deref().unwrap_or("none")
        );

        let events = Arc::clone(&self.events);
        let document_id = doc.id.clone();
        tokio::spawn(async move {
            if let Err(e) = events
                .publish(DOCUMENT_UPLOADED, json!({ "documentId": document_id }))
                .await
            {
                warn!("Event {} for {} not delivered: {}", DOCUMENT_UPLOADED, document_id, e);
            }
        });

        Ok(doc)
    }

    /// Documents visible to the actor, newest first
    pub async fn list_for(&self, actor: &Actor) -> Result<Vec<ComplianceDocument>, ServiceError> {
        Ok(self.documents.list(&DocumentScope::for_actor(actor)).await?)
    }

    /// A single document, hidden as not-found when out of the actor's scope
    pub async fn get_for(
        &self,
        actor: &Actor,
        id: &str,
    ) -> Result<ComplianceDocument, ServiceError> {
        self.documents
            .get(id)
            .await?
            .filter(|doc| DocumentScope::for_actor(actor).admits(doc))
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Change a document's status through the review workflow.
    ///
    /// The caller is authorized before the requested status is validated.
    /// The change itself is applied by the store against the current record.
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: &str,
        status: &str,
        notes: Option<&str>,
    ) -> Result<ComplianceDocument, ServiceError> {
        if !matches!(actor.role, Role::Lawyer | Role::Admin) {
            return Err(WorkflowError::AuthorizationDenied(
                "only lawyers can update document status".into(),
            )
            .into());
        }

        let doc = self
            .documents
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        // The assignment is fixed at submission, so this copy is current for it
        authorize(&doc, actor)?;
        let new_status = parse_status(status)?;

        let update = ReviewUpdate::new(new_status, notes, Utc::now());
        let updated = self.documents.apply_review(id, &update).await?;

        info!(
            "Document {} moved {} -> {} by {}",
            id, doc.status, updated.status, actor.user_id
        );
        Ok(updated)
    }
}
