//! Audit events emitted by the document pipeline

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event name published after a document has been submitted and analyzed
pub const DOCUMENT_UPLOADED: &str = "document/uploaded";

/// A single published event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_id: String,
    pub name: String,
    pub timestamp: String,
    pub document_id: Option<String>,
    pub payload: serde_json::Value,
}

impl AuditEvent {
    /// Create a new event, lifting `documentId` out of the payload when present
    pub fn new(name: &str, payload: serde_json::Value) -> Self {
        let document_id = payload
            .get("documentId")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            document_id,
            payload,
        }
    }
}

/// Append-only log of events
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuditTrail {
    pub events: Vec<AuditEvent>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: AuditEvent) {
        self.events.push(event);
    }

    /// All events recorded for one document, oldest first
    pub fn for_document<'a>(&'a self, document_id: &'a str) -> impl Iterator<Item = &'a AuditEvent> {
        self.events
            .iter()
            .filter(move |e| e.document_id.as_deref() == Some(document_id))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
