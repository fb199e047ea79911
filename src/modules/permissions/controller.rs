use aintar_core::{AppError, PermissionId};
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::middleware::auth::{AuthUser, RequireAdminPermissions};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    DependentsDto, DependentsResponse, PermissionDetailResponse, PermissionEditDto,
    PermissionEditResponse, PermissionFilterParams, PermissionResponse, PermissionSetDto,
    ResolvedPermissionsResponse,
};
use super::service;

#[utoipa::path(
    get,
    path = "/api/permissions",
    params(PermissionFilterParams),
    responses(
        (status = 200, description = "Permission catalog", body = Vec<PermissionResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_permissions(
    _auth_user: AuthUser,
    Query(params): Query<PermissionFilterParams>,
) -> Json<Vec<PermissionResponse>> {
    Json(service::list_permissions(params.category))
}

#[utoipa::path(
    get,
    path = "/api/permissions/me",
    responses(
        (status = 200, description = "The caller's granted and effective permissions", body = ResolvedPermissionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_my_permissions(auth_user: AuthUser) -> Json<ResolvedPermissionsResponse> {
    let granted = auth_user.claims.permissions.iter().copied().collect();
    Json(ResolvedPermissionsResponse::new(&granted, &auth_user.resolved))
}

#[utoipa::path(
    get,
    path = "/api/permissions/{id}",
    params(
        ("id" = u32, Path, description = "Permission ID")
    ),
    responses(
        (status = 200, description = "Permission with its dependencies", body = PermissionDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Permission not found")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_permission_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<u32>,
) -> Result<Json<PermissionDetailResponse>, AppError> {
    let graph = state.workflow.snapshot().graph;
    let permission = service::get_permission(&graph, PermissionId(id))?;
    Ok(Json(permission))
}

#[utoipa::path(
    post,
    path = "/api/permissions/resolve",
    request_body = PermissionSetDto,
    responses(
        (status = 200, description = "Set closed under dependencies", body = ResolvedPermissionsResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn resolve_permissions(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<PermissionSetDto>,
) -> Json<ResolvedPermissionsResponse> {
    let graph = state.workflow.snapshot().graph;
    Json(service::resolve(&graph, &dto.permissions))
}

#[utoipa::path(
    post,
    path = "/api/permissions/dependents",
    request_body = DependentsDto,
    responses(
        (status = 200, description = "Held permissions that require the given one", body = DependentsResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_dependents(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<DependentsDto>,
) -> Json<DependentsResponse> {
    let graph = state.workflow.snapshot().graph;
    Json(service::dependents(&graph, dto.permission, &dto.permissions))
}

#[utoipa::path(
    post,
    path = "/api/permissions/grant",
    request_body = PermissionEditDto,
    responses(
        (status = 200, description = "Set after granting with prerequisites", body = PermissionEditResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Permission not found")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn grant_permission(
    State(state): State<AppState>,
    _admin: RequireAdminPermissions,
    ValidatedJson(dto): ValidatedJson<PermissionEditDto>,
) -> Result<Json<PermissionEditResponse>, AppError> {
    let graph = state.workflow.snapshot().graph;
    let result = service::grant(&graph, dto.permission, &dto.permissions)?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/permissions/revoke",
    request_body = PermissionEditDto,
    responses(
        (status = 200, description = "Set after revoking with dependents", body = PermissionEditResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Permission not found")
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn revoke_permission(
    State(state): State<AppState>,
    _admin: RequireAdminPermissions,
    ValidatedJson(dto): ValidatedJson<PermissionEditDto>,
) -> Result<Json<PermissionEditResponse>, AppError> {
    let graph = state.workflow.snapshot().graph;
    let result = service::revoke(&graph, dto.permission, &dto.permissions)?;
    Ok(Json(result))
}
