use crate::docs::ApiDoc;
use crate::modules::admin::router::init_admin_router;
use crate::modules::health::router::init_health_router;
use crate::modules::navigation::router::init_navigation_router;
use crate::modules::permissions::router::init_permissions_router;
use crate::modules::workflow::router::init_workflow_router;
use crate::state::AppState;
use aintar_observability::logging_middleware;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/health", init_health_router())
        .nest(
            "/api",
            Router::new()
                .nest("/permissions", init_permissions_router())
                .nest("/navigation", init_navigation_router())
                .nest("/workflow", init_workflow_router())
                .nest("/admin", init_admin_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
