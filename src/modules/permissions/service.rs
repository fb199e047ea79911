use aintar_core::permissions::{self, CATALOG};
use aintar_core::{AppError, DependencyGraph, PermissionCategory, PermissionId, PermissionSet};
use anyhow::anyhow;

use super::model::{
    DependentsResponse, PermissionDetailResponse, PermissionEditResponse, PermissionResponse,
    ResolvedPermissionsResponse,
};

pub fn list_permissions(category: Option<PermissionCategory>) -> Vec<PermissionResponse> {
    CATALOG
        .iter()
        .filter(|info| category.is_none_or(|c| info.category == c))
        .map(PermissionResponse::from)
        .collect()
}

pub fn get_permission(
    graph: &DependencyGraph,
    id: PermissionId,
) -> Result<PermissionDetailResponse, AppError> {
    let info = known(id)?;

    Ok(PermissionDetailResponse {
        permission: PermissionResponse::from(info),
        requires: graph.direct(id).collect(),
        resolved_dependencies: graph.resolve_dependencies(id).into_iter().collect(),
    })
}

pub fn resolve(graph: &DependencyGraph, granted: &[PermissionId]) -> ResolvedPermissionsResponse {
    let granted: PermissionSet = granted.iter().copied().collect();
    let resolved = graph.resolve_all(granted.iter().copied());
    ResolvedPermissionsResponse::new(&granted, &resolved)
}

pub fn dependents(
    graph: &DependencyGraph,
    permission: PermissionId,
    current: &[PermissionId],
) -> DependentsResponse {
    let current: PermissionSet = current.iter().copied().collect();
    DependentsResponse {
        permission,
        dependents: graph.dependents(permission, &current).into_iter().collect(),
    }
}

/// Editor "check": add `permission` with its prerequisites.
pub fn grant(
    graph: &DependencyGraph,
    permission: PermissionId,
    current: &[PermissionId],
) -> Result<PermissionEditResponse, AppError> {
    known(permission)?;
    let before: PermissionSet = current.iter().copied().collect();
    let after = graph.grant(&before, permission);
    Ok(PermissionEditResponse::new(&before, &after))
}

/// Editor "uncheck": remove `permission` and everything relying on it.
pub fn revoke(
    graph: &DependencyGraph,
    permission: PermissionId,
    current: &[PermissionId],
) -> Result<PermissionEditResponse, AppError> {
    known(permission)?;
    let before: PermissionSet = current.iter().copied().collect();
    let after = graph.revoke(&before, permission);
    Ok(PermissionEditResponse::new(&before, &after))
}

fn known(id: PermissionId) -> Result<&'static aintar_core::PermissionInfo, AppError> {
    permissions::describe(id).ok_or_else(|| AppError::not_found(anyhow!("Permission {} not found", id)))
}
