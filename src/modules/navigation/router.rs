use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{detect_module, get_all_modules, get_module_by_id, get_my_modules};

pub fn init_navigation_router() -> Router<AppState> {
    Router::new()
        .route("/modules", get(get_my_modules))
        .route("/modules/all", get(get_all_modules))
        .route("/modules/{id}", get(get_module_by_id))
        .route("/detect", get(detect_module))
}
