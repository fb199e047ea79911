use aintar_core::AppError;
use axum::{Json, extract::State};

use crate::middleware::auth::RequireAdminSettings;
use crate::state::AppState;

use super::model::{MetadataSummary, ReloadResponse};
use super::service;

#[utoipa::path(
    get,
    path = "/api/admin/metadata",
    responses(
        (status = 200, description = "Active snapshot counts and consistency issues", body = MetadataSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn get_metadata_summary(
    State(state): State<AppState>,
    _admin: RequireAdminSettings,
) -> Json<MetadataSummary> {
    Json(service::summary(&state))
}

#[utoipa::path(
    post,
    path = "/api/admin/metadata/reload",
    responses(
        (status = 200, description = "Snapshot reloaded", body = ReloadResponse),
        (status = 400, description = "No snapshot path configured, or the file does not exist"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "A reload is already running"),
        (status = 422, description = "Snapshot is invalid; the previous one stays active")
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
pub async fn reload_metadata(
    State(state): State<AppState>,
    RequireAdminSettings(admin): RequireAdminSettings,
) -> Result<Json<ReloadResponse>, AppError> {
    let response = service::reload_metadata(&state, &admin.claims.sub).await?;
    Ok(Json(response))
}
