use aintar_core::AppError;
use axum::{
    Json,
    extract::{Path, Query},
};

use crate::middleware::auth::AuthUser;

use super::model::{DetectParams, DetectResponse, ModuleResponse, ModulesResponse};
use super::service;

#[utoipa::path(
    get,
    path = "/api/navigation/modules",
    responses(
        (status = 200, description = "Modules the caller may open, with the landing route", body = ModulesResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_my_modules(auth_user: AuthUser) -> Json<ModulesResponse> {
    Json(service::modules_for(&auth_user))
}

#[utoipa::path(
    get,
    path = "/api/navigation/modules/all",
    responses(
        (status = 200, description = "Every navigation module", body = Vec<ModuleResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_all_modules(_auth_user: AuthUser) -> Json<Vec<ModuleResponse>> {
    Json(service::list_all_modules())
}

#[utoipa::path(
    get,
    path = "/api/navigation/modules/{id}",
    params(
        ("id" = String, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Navigation module", body = ModuleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Module not found")
    ),
    tag = "Navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_module_by_id(
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ModuleResponse>, AppError> {
    Ok(Json(service::get_module(&id)?))
}

#[utoipa::path(
    get,
    path = "/api/navigation/detect",
    params(DetectParams),
    responses(
        (status = 200, description = "Module owning the pathname, if any", body = DetectResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Navigation",
    security(("bearer_auth" = []))
)]
pub async fn detect_module(
    _auth_user: AuthUser,
    Query(params): Query<DetectParams>,
) -> Json<DetectResponse> {
    Json(service::detect(&params.path))
}
