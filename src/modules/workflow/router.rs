use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_available_transitions, validate_transition};

pub fn init_workflow_router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate_transition))
        .route("/transitions", get(get_available_transitions))
}
