mod common;

use axum::http::StatusCode;
use common::{get, send, setup_test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_test_app();
    let (status, body) = send(app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (app, _) = setup_test_app();
    let (status, body) = send(app, get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/api/permissions",
        "/api/permissions/{id}",
        "/api/navigation/modules",
        "/api/workflow/validate",
        "/api/admin/metadata/reload",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    use tower::ServiceExt;

    let (app, _) = setup_test_app();
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}
