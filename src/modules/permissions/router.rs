use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    get_dependents, get_my_permissions, get_permission_by_id, get_permissions, grant_permission,
    resolve_permissions, revoke_permission,
};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_permissions))
        .route("/me", get(get_my_permissions))
        .route("/{id}", get(get_permission_by_id))
        .route("/resolve", post(resolve_permissions))
        .route("/dependents", post(get_dependents))
        // Permission editor
        .route("/grant", post(grant_permission))
        .route("/revoke", post(revoke_permission))
}
