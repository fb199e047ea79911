use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_metadata_summary, reload_metadata};

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/metadata", get(get_metadata_summary))
        .route("/metadata/reload", post(reload_metadata))
}
