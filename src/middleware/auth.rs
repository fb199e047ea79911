use aintar_auth::{Claims, verify_token};
use aintar_cache::{hash_filters, keys};
use aintar_core::{AppError, PermissionCheck, PermissionId, PermissionSet};
use aintar_models::UserId;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::state::AppState;

/// Extractor that validates the bearer token and resolves the caller's
/// effective permissions.
///
/// `resolved` is the token's grants plus every prerequisite, so a user
/// granted `TASKS_CREATE` also passes checks for `TASKS_VIEW`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
    pub resolved: PermissionSet,
}

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn name(&self) -> &str {
        &self.claims.name
    }

    /// Fail with `403` unless `permission` is held.
    pub fn require(&self, permission: PermissionId) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Access denied. Missing required permission: {}",
                permission
            )))
        }
    }
}

impl PermissionCheck for AuthUser {
    fn has_permission(&self, permission: PermissionId) -> bool {
        self.resolved.contains(&permission)
    }
}

/// Grants plus prerequisites, cached per snapshot, user and grant list.
fn resolve_permissions(state: &AppState, user_id: UserId, claims: &Claims) -> PermissionSet {
    let snapshot = state.workflow.snapshot();
    let key = keys::permissions::user(
        snapshot.generation,
        user_id,
        &hash_filters(&claims.permissions),
    );
    state.cache.get_or_insert_with(&key, || {
        let resolved = snapshot.graph.resolve_all(claims.permissions.iter().copied());
        debug!(
            user_id = %user_id,
            granted = claims.permissions.len(),
            resolved = resolved.len(),
            "Resolved caller permissions"
        );
        resolved
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token"))?;
        let resolved = resolve_permissions(state, user_id, &claims);

        Ok(AuthUser { claims, resolved })
    }
}

/// Declares an extractor that requires one permission (after dependency
/// resolution) on top of [`AuthUser`].
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:path) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = aintar_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;
                auth_user.require($permission)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_permission!(RequireAdminSettings, aintar_core::permissions::ADMIN_SETTINGS);
require_permission!(RequireAdminPermissions, aintar_core::permissions::ADMIN_PERMISSIONS);
require_permission!(RequireDocsView, aintar_core::permissions::DOCS_VIEW);
