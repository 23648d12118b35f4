//! In-process tests for the compliance API
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`;
//! no socket is opened and AI analysis is disabled, so every score comes
//! from the baseline analyzer.

#[cfg(test)]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use compliance_engine::ComplianceEngine;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use shared_types::{Role, User};
    use tower::ServiceExt;

    use crate::{app, AppState};

    fn user(id: &str, role: Role, specializations: &[&str]) -> User {
        User {
            id: id.into(),
            email: format!("{}@example.com", id),
            role,
            specializations: specializations.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn test_app() -> Router {
        let users = vec![
            user("client-1", Role::Client, &[]),
            user("client-2", Role::Client, &[]),
            user("lawyer-dp", Role::Lawyer, &["Data Protection"]),
            user("lawyer-gdpr", Role::Lawyer, &["GDPR"]),
            user("admin-1", Role::Admin, &[]),
        ];
        app(AppState::new(ComplianceEngine::baseline_only(), users))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        caller: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = caller {
            builder = builder.header("x-user-id", id);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn submit(app: &Router, caller: &str, body: Value) -> Value {
        let (status, value) = send(app, "POST", "/api/documents", Some(caller), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "body: {}", value);
        value["document"].clone()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&test_app(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["aiEnabled"], false);
    }

    #[tokio::test]
    async fn test_list_regulations() {
        let (status, body) = send(&test_app(), "GET", "/api/regulations", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 4);

        let ccpa = body["regulations"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["code"] == "CCPA")
            .unwrap();
        assert_eq!(ccpa["checkCount"], 10);
        assert!(ccpa["checks"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["citation"] == "CCPA §1798.120" && c["severity"] == "critical"));
    }

    #[tokio::test]
    async fn test_list_lawyers() {
        let (status, body) = send(&test_app(), "GET", "/api/lawyers", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["lawyers"][0]["id"], "lawyer-dp");
    }

    #[tokio::test]
    async fn test_submit_scores_and_assigns() {
        let app = test_app();
        let doc = submit(
            &app,
            "client-1",
            json!({ "documentName": "Privacy Notice", "content": "We collect your email address." }),
        )
        .await;

        assert_eq!(doc["documentType"], "privacy_policy");
        assert_eq!(doc["regulations"], json!(["GDPR"]));
        assert_eq!(doc["status"], "IN_REVIEW");
        assert_eq!(doc["assignedLawyer"], "lawyer-gdpr");
        assert_eq!(doc["createdBy"], "client-1");
        assert!(doc["complianceScore"].as_u64().unwrap() <= 100);
        assert!(!doc["violations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_fields() {
        let (status, body) = send(
            &test_app(),
            "POST",
            "/api/documents",
            Some("client-1"),
            Some(json!({ "documentName": "Notice" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_document_type() {
        let (status, body) = send(
            &test_app(),
            "POST",
            "/api/documents",
            Some("client-1"),
            Some(json!({ "documentName": "N", "content": "c", "documentType": "memo" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn test_identity_required() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/documents", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHENTICATED");

        let (status, _) = send(&app, "GET", "/api/documents", Some("ghost"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_role_header_must_match() {
        let request = Request::builder()
            .uri("/api/documents")
            .header("x-user-id", "client-1")
            .header("x-user-role", "admin")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_listing_and_fetch_are_scoped() {
        let app = test_app();
        let first = submit(&app, "client-1", json!({ "documentName": "A", "content": "x" })).await;
        let second = submit(&app, "client-1", json!({ "documentName": "B", "content": "y" })).await;
        let other = submit(&app, "client-2", json!({ "documentName": "C", "content": "z" })).await;

        let (_, mine) = send(&app, "GET", "/api/documents", Some("client-1"), None).await;
        let ids: Vec<&str> = mine
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![second["id"].as_str().unwrap(), first["id"].as_str().unwrap()]
        );

        let (_, all) = send(&app, "GET", "/api/documents", Some("admin-1"), None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (_, assigned) = send(&app, "GET", "/api/documents", Some("lawyer-dp"), None).await;
        assert!(assigned.as_array().unwrap().is_empty());

        let uri = format!("/api/documents/{}", other["id"].as_str().unwrap());
        let (status, body) = send(&app, "GET", &uri, Some("client-1"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "DOCUMENT_NOT_FOUND");

        let (status, body) = send(&app, "GET", &uri, Some("client-2"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["documentName"], "C");
    }

    #[tokio::test]
    async fn test_review_flow() {
        let app = test_app();
        let doc = submit(&app, "client-1", json!({ "documentName": "A", "content": "x" })).await;
        let uri = format!("/api/documents/{}/status", doc["id"].as_str().unwrap());

        let (status, body) = send(
            &app,
            "PATCH",
            &uri,
            Some("lawyer-gdpr"),
            Some(json!({ "status": "APPROVED", "lawyerNotes": "Fine" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Document updated");
        assert_eq!(body["document"]["status"], "APPROVED");
        assert_eq!(body["document"]["lawyerNotes"], "Fine");
        let reviewed_at = body["document"]["reviewedAt"].clone();
        assert!(reviewed_at.is_string());

        let (_, body) = send(
            &app,
            "PATCH",
            &uri,
            Some("lawyer-gdpr"),
            Some(json!({ "status": "REVISION_NEEDED" })),
        )
        .await;
        assert_eq!(body["document"]["status"], "REVISION_NEEDED");
        assert_eq!(body["document"]["reviewedAt"], reviewed_at);
        assert_eq!(body["document"]["lawyerNotes"], "Fine");
    }

    #[tokio::test]
    async fn test_status_update_rejections() {
        let app = test_app();
        let doc = submit(&app, "client-1", json!({ "documentName": "A", "content": "x" })).await;
        let uri = format!("/api/documents/{}/status", doc["id"].as_str().unwrap());
        let approve = json!({ "status": "APPROVED" });

        let (status, body) = send(&app, "PATCH", &uri, Some("client-1"), Some(approve.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "AUTHORIZATION_DENIED");

        let (status, _) = send(&app, "PATCH", &uri, Some("lawyer-dp"), Some(approve.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            "PATCH",
            &uri,
            Some("lawyer-gdpr"),
            Some(json!({ "status": "DONE" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/documents/missing/status",
            Some("lawyer-gdpr"),
            Some(approve),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let get_uri = format!("/api/documents/{}", doc["id"].as_str().unwrap());
        let (_, body) = send(&app, "GET", &get_uri, Some("client-1"), None).await;
        assert_eq!(body["document"]["status"], "IN_REVIEW");
        assert_eq!(body["document"]["reviewedAt"], Value::Null);
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use shared_types::{DocumentStatus, Role};

    proptest! {
        /// Property: every status name the API accepts round-trips through its wire form
        #[test]
        fn status_names_round_trip(status in proptest::sample::select(DocumentStatus::ALL.to_vec())) {
            let parsed: DocumentStatus = status.as_str().parse().unwrap();
            prop_assert_eq!(parsed, status);
        }

        /// Property: role header parsing ignores case and surrounding whitespace
        #[test]
        fn role_header_is_case_insensitive(
            role in prop_oneof![Just("client"), Just("lawyer"), Just("admin")],
            upper in any::<bool>(),
            pad in " {0,3}",
        ) {
            let raw = if upper { role.to_uppercase() } else { role.to_string() };
            let header = format!("{}{}{}", pad, raw, pad);
            prop_assert!(header.parse::<Role>().is_ok());
        }

        /// Property: arbitrary strings outside the five states are rejected
        #[test]
        fn unknown_statuses_rejected(raw in "[A-Z_]{1,20}") {
            let known = DocumentStatus::ALL.iter().any(|s| s.as_str() == raw);
            prop_assert_eq!(raw.parse::<DocumentStatus>().is_ok(), known);
        }
    }
}
