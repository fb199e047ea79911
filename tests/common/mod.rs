#![allow(dead_code)]

use std::path::PathBuf;

use aintar::router::init_router;
use aintar::state::AppState;
use aintar_auth::create_access_token;
use aintar_cache::CacheConfig;
use aintar_config::{CorsConfig, JwtConfig, ServerConfig};
use aintar_core::PermissionId;
use aintar_models::{UserId, WorkflowMetadata};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const OWNER: i64 = 10;
pub const CLERK: i64 = 11;
pub const RETIRED: i64 = 12;

/// Steps 0..=5: entry, analysis, budgeting, field assessment, billing, done.
pub const SNAPSHOT: &str = r#"{
    "steps": [
        {"id": 0, "name": "ENTRADA", "kind": "entry"},
        {"id": 1, "name": "Em análise", "kind": "standard"},
        {"id": 2, "name": "Orçamentação", "kind": "budgeting"},
        {"id": 3, "name": "Avaliação no terreno", "kind": "field_assessment"},
        {"id": 4, "name": "Cobrança", "kind": "billing"},
        {"id": 5, "name": "Concluído", "kind": "terminal"}
    ],
    "users": [
        {"id": 10, "name": "Ana"},
        {"id": 11, "name": "Rui"},
        {"id": 12, "name": "Rosa", "active": false}
    ],
    "doc_types": [{"id": 1, "name": "Ramal de água"}],
    "transitions": [
        {"doctype": 1, "from_step": 0, "to_step": 1, "client": [10, 11]},
        {"doctype": 1, "from_step": 1, "to_step": 2, "client": 11},
        {"doctype": 1, "from_step": 1, "to_step": 3, "client": [10, 11]},
        {"doctype": 1, "from_step": 1, "to_step": 0, "client": [10, 11]},
        {"doctype": 1, "from_step": 2, "to_step": 4, "client": [10]},
        {"doctype": 1, "from_step": 4, "to_step": 5, "client": [10]},
        {"doctype": 1, "from_step": 5, "to_step": 1, "client": [10]},
        {"doctype": 1, "from_step": 3, "to_step": 3, "client": [10, 11, 12]}
    ]
}"#;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn fixture_metadata() -> WorkflowMetadata {
    WorkflowMetadata::from_json_str(SNAPSHOT).unwrap()
}

fn cache_config() -> CacheConfig {
    CacheConfig {
        retry_attempts: 2,
        retry_base_ms: 1,
        retry_max_ms: 2,
        ..CacheConfig::default()
    }
}

pub fn test_state_with(metadata: WorkflowMetadata, metadata_path: Option<PathBuf>) -> AppState {
    AppState::new(
        metadata,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            metadata_path,
        },
        &cache_config(),
    )
    .unwrap()
}

pub fn setup_test_app() -> (axum::Router, AppState) {
    let state = test_state_with(fixture_metadata(), None);
    (init_router(state.clone()), state)
}

pub fn token_for(user_id: i64, permissions: &[PermissionId]) -> String {
    create_access_token(
        UserId(user_id),
        "Test User",
        permissions.to_vec(),
        &jwt_config(),
    )
    .unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Send one request and decode the body: JSON when possible, otherwise
/// the raw text as a string (`Null` when empty).
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, body)
}

/// Unique scratch file path for snapshot reload tests.
pub fn temp_snapshot_path() -> PathBuf {
    std::env::temp_dir().join(format!("aintar-metadata-{}.json", uuid::Uuid::new_v4()))
}
