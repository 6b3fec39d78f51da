//! HTTP server for BioLedger.
//!
//! Exposes biometric registration and verification over HTTP, with a
//! permissive CORS layer, request tracing, and per-client rate limiting.

pub mod audit;
pub mod config;
pub mod error;
pub mod handler;
pub mod rate_limit;
pub mod router;
pub mod server;
pub mod state;

pub use audit::{AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use config::{RateLimitConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use rate_limit::RateLimiter;
pub use server::BioLedgerServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use bioledger_crypto::ContentHasher;
    use bioledger_ledger::ChainReader;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::*;

    fn test_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.chain.difficulty = 1;
        config.rate_limit.max_requests = 1_000;
        config
    }

    fn test_app() -> (Router, AppState, Arc<MemoryAuditSink>) {
        let sink = Arc::new(MemoryAuditSink::new());
        let state = AppState::with_audit(test_config(), sink.clone()).unwrap();
        (router::build_router(state.clone()), state, sink)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn biometric(user: &str, data: &str, kind: &str) -> Value {
        json!({ "user_id": user, "biometric_data": data, "biometric_type": kind })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _, _) = test_app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (app, _, _) = test_app();
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["difficulty"], 1);
    }

    #[tokio::test]
    async fn register_and_verify_flow() {
        let (app, state, sink) = test_app();

        let (status, body) = send(
            &app,
            post("/register_biometric", biometric("alice", "thumbprint-raw-A", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["digest"], ContentHasher::digest(b"thumbprint-raw-A"));
        assert_eq!(body["block_index"], 1);
        assert_eq!(state.chain().block_count().unwrap(), 2);

        let records = sink.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity, "alice");
        assert_eq!(records[0].block_index, 1);

        let (status, body) = send(
            &app,
            post("/verify_biometric", biometric("alice", "thumbprint-raw-A", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (status, body) = send(
            &app,
            post("/verify_biometric", biometric("alice", "thumbprint-raw-B", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Biometric mismatch");

        let (status, body) = send(
            &app,
            post("/verify_biometric", biometric("bob", "anything", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Biometric not registered");
    }

    #[tokio::test]
    async fn blank_fields_are_bad_requests() {
        let (app, state, sink) = test_app();
        let (status, body) = send(
            &app,
            post("/register_biometric", biometric("alice", "   ", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("sample must not be empty"));
        assert_eq!(state.chain().block_count().unwrap(), 1);
        assert!(sink.records().unwrap().is_empty());

        let (status, _) = send(&app, post("/verify_biometric", biometric("", "x", "facial"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_by_extractor() {
        let (app, _, _) = test_app();
        let request = post("/register_biometric", json!({ "user_id": "alice" }));
        let (status, _) = send(&app, request).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn validate_and_chain_endpoints() {
        let (app, _, _) = test_app();
        send(&app, post("/register_biometric", biometric("alice", "A", "fingerprint"))).await;
        send(&app, post("/register_biometric", biometric("bob", "B", "facial"))).await;

        let (status, body) = send(&app, get("/validate")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["corrupt_at"], Value::Null);
        assert_eq!(body["block_count"], 3);
        assert_eq!(body["violations"], json!([]));

        let (status, body) = send(&app, get("/chain")).await;
        assert_eq!(status, StatusCode::OK);
        let blocks = body.as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0]["previous_hash"], "0");
        assert_eq!(blocks[1]["identity"], "alice");
        assert_eq!(blocks[2]["previous_hash"], blocks[1]["hash"]);
        assert!(blocks[1].get("biometric_data").is_none());
    }

    #[tokio::test]
    async fn status_endpoint_reports_registration() {
        let (app, _, _) = test_app();
        let uri = "/status?user_id=alice&biometric_type=fingerprint";

        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unregistered");

        send(&app, post("/register_biometric", biometric("alice", "A", "fingerprint"))).await;
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "registered");

        let (status, body) = send(&app, get("/status?user_id=&biometric_type=facial")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("identity must not be empty"));
    }

    struct FailingAuditSink;

    #[async_trait::async_trait]
    impl AuditSink for FailingAuditSink {
        async fn record_registration(&self, _record: &AuditRecord) -> ServerResult<()> {
            Err(ServerError::Internal("audit store unavailable".into()))
        }
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_registration() {
        let state = AppState::with_audit(test_config(), Arc::new(FailingAuditSink)).unwrap();
        let app = router::build_router(state.clone());

        let (status, body) = send(
            &app,
            post("/register_biometric", biometric("alice", "A", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["block_index"], 1);
        assert_eq!(state.chain().block_count().unwrap(), 2);

        let (status, _) = send(
            &app,
            post("/verify_biometric", biometric("alice", "A", "fingerprint")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn rate_limit_rejects_excess_requests() {
        let mut config = test_config();
        config.rate_limit.max_requests = 2;
        let app = router::build_router(AppState::new(config).unwrap());

        assert_eq!(send(&app, get("/health")).await.0, StatusCode::OK);
        assert_eq!(send(&app, get("/health")).await.0, StatusCode::OK);
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["detail"].as_str().unwrap().contains("rate limit exceeded"));
    }

    #[tokio::test]
    async fn cors_headers_are_present() {
        let (app, _, _) = test_app();
        let request = Request::builder()
            .uri("/health")
            .header("origin", "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
