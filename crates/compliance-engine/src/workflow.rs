//! Review workflow state machine
//!
//! Status changes are made only by the document's assigned lawyer. Every
//! status is reachable from every state; the terminal states only decide
//! when `reviewedAt` is stamped, and that happens once.

use chrono::{DateTime, Utc};
use shared_types::{ComplianceDocument, DocumentStatus, Role};
use tracing::{info, warn};

use crate::error::WorkflowError;

/// The caller requesting a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

/// Parse a requested status, rejecting anything outside the five states
pub fn parse_status(raw: &str) -> Result<DocumentStatus, WorkflowError> {
    raw.parse::<DocumentStatus>()
        .map_err(|e| WorkflowError::ValidationFailed(e.to_string()))
}

/// The field changes of one status transition.
///
/// Applied against the stored record, so a concurrent update of other fields
/// is never overwritten and `reviewedAt` is only stamped if still unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub status: DocumentStatus,
    /// Replacement notes; `None` keeps the current notes
    pub notes: Option<String>,
    /// Stamp for `reviewedAt` when `status` is terminal
    pub at: DateTime<Utc>,
}

impl ReviewUpdate {
    /// Empty notes count as no notes
    pub fn new(status: DocumentStatus, notes: Option<&str>, at: DateTime<Utc>) -> Self {
        Self {
            status,
            notes: notes.filter(|n| !n.is_empty()).map(str::to_string),
            at,
        }
    }

    pub fn apply_to(&self, document: &mut ComplianceDocument) {
        document.status = self.status;

        if let Some(notes) = &self.notes {
            document.lawyer_notes = notes.clone();
        }

        if self.status.is_terminal() && document.reviewed_at.is_none() {
            document.reviewed_at = Some(self.at);
        }
    }
}

/// Apply a status change, stamping `reviewedAt` with the current time.
pub fn transition(
    document: &ComplianceDocument,
    actor: &Actor,
    new_status: DocumentStatus,
    notes: Option<&str>,
) -> Result<ComplianceDocument, WorkflowError> {
    transition_at(document, actor, new_status, notes, Utc::now())
}

/// Apply a status change at a given time.
///
/// Returns the updated document; the input is never modified, so a denied
/// transition leaves no trace.
pub fn transition_at(
    document: &ComplianceDocument,
    actor: &Actor,
    new_status: DocumentStatus,
    notes: Option<&str>,
    now: DateTime<Utc>,
) -> Result<ComplianceDocument, WorkflowError> {
    authorize(document, actor)?;

    let mut updated = document.clone();
    ReviewUpdate::new(new_status, notes, now).apply_to(&mut updated);

    info!(
        "Document {} moved {} -> {} by {}",
        document.id, document.status, new_status, actor.user_id
    );
    Ok(updated)
}

/// Only the assigned lawyer, acting as a lawyer, may change a document's status
pub fn authorize(document: &ComplianceDocument, actor: &Actor) -> Result<(), WorkflowError> {
    let assigned = document.assigned_lawyer.as_deref();

    if actor.role != Role::Lawyer || assigned != Some(actor.user_id.as_str()) {
        warn!(
            "Denied status change on {} by {} (assigned: {})",
            document.id,
            actor.user_id,
            assigned.unwrap_or("none")
        );
        return Err(WorkflowError::AuthorizationDenied(format!(
            "user {} is not the assigned lawyer for document {}",
            actor.user_id, document.id
        )));
    }

    Ok(())
}
