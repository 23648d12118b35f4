//! API handlers for the compliance server
//!
//! Provides REST endpoints for:
//! - Document submission and analysis
//! - Role-scoped document listing
//! - Review status updates
//! - Regulation catalog and lawyer listing

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use compliance_engine::catalog::{self, RuleCheck};
use compliance_engine::{Actor, SubmissionRequest};
use serde::{Deserialize, Serialize};
use shared_types::{ComplianceDocument, Role};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";
/// Optional header carrying the caller's role
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Resolve the caller from identity headers
async fn identify(state: &AppState, headers: &HeaderMap) -> Result<Actor, ApiError> {
    let user_id = header_value(headers, USER_ID_HEADER)?
        .ok_or_else(|| ApiError::Unauthenticated(format!("missing {} header", USER_ID_HEADER)))?;

    let role = header_value(headers, USER_ROLE_HEADER)?
        .map(|raw| {
            raw.parse::<Role>()
                .map_err(|e| ApiError::Unauthenticated(e.to_string()))
        })
        .transpose()?;

    Ok(state.service.identify(user_id, role).await?)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, ApiError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.trim()).filter(|v| !v.is_empty()))
            .map_err(|_| ApiError::Unauthenticated(format!("invalid {} header", name))),
    }
}

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ai_enabled: bool,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "compliance-api",
        version: env!("CARGO_PKG_VERSION"),
        ai_enabled: state.service.engine().ai_enabled(),
    })
}

/// Catalog entry for one regulation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationInfo {
    pub code: &'static str,
    pub check_count: usize,
    pub checks: &'static [RuleCheck],
}

#[derive(Serialize)]
pub struct RegulationListResponse {
    pub success: bool,
    pub regulations: Vec<RegulationInfo>,
    pub count: usize,
}

/// Handler: GET /api/regulations
pub async fn handle_list_regulations() -> Json<RegulationListResponse> {
    let regulations: Vec<RegulationInfo> = catalog::regulations()
        .into_iter()
        .map(|code| {
            let checks = catalog::checks_for(code);
            RegulationInfo {
                code,
                check_count: checks.len(),
                checks,
            }
        })
        .collect();

    let count = regulations.len();
    Json(RegulationListResponse {
        success: true,
        regulations,
        count,
    })
}

#[derive(Serialize)]
pub struct LawyerInfo {
    pub id: String,
    pub email: String,
    pub specializations: Vec<String>,
}

#[derive(Serialize)]
pub struct LawyerListResponse {
    pub success: bool,
    pub lawyers: Vec<LawyerInfo>,
    pub count: usize,
}

/// Handler: GET /api/lawyers
pub async fn handle_list_lawyers(
    State(state): State<AppState>,
) -> Result<Json<LawyerListResponse>, ApiError> {
    let lawyers: Vec<LawyerInfo> = state
        .service
        .lawyers()
        .await?
        .into_iter()
        .map(|u| LawyerInfo {
            id: u.id,
            email: u.email,
            specializations: u.specializations,
        })
        .collect();

    let count = lawyers.len();
    Ok(Json(LawyerListResponse {
        success: true,
        lawyers,
        count,
    }))
}

/// Response carrying a single document
#[derive(Serialize)]
pub struct DocumentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub document: ComplianceDocument,
}

/// Handler: POST /api/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    let actor = identify(&state, &headers).await?;
    let Json(request) = body?;

    info!("Submission from {}", actor.user_id);
    let document = state.service.submit(request, &actor).await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            message: Some("Document analyzed"),
            document,
        }),
    ))
}

/// Handler: GET /api/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ComplianceDocument>>, ApiError> {
    let actor = identify(&state, &headers).await?;
    let documents = state.service.list_for(&actor).await?;
    debug!("Listing {} documents for {}", documents.len(), actor.user_id);
    Ok(Json(documents))
}

/// Handler: GET /api/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let actor = identify(&state, &headers).await?;
    let document = state.service.get_for(&actor, &id).await?;
    Ok(Json(DocumentResponse {
        message: None,
        document,
    }))
}

/// Status change request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub lawyer_notes: Option<String>,
}

/// Handler: PATCH /api/documents/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let actor = identify(&state, &headers).await?;
    let Json(request) = body?;

    let document = state
        .service
        .update_status(&actor, &id, &request.status, request.lawyer_notes.as_deref())
        .await?;

    Ok(Json(DocumentResponse {
        message: Some("Document updated"),
        document,
    }))
}
