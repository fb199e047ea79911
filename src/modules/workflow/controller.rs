use aintar_core::AppError;
use aintar_workflow::{AvailableTransition, ValidationReport};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::middleware::auth::RequireDocsView;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{TransitionsParams, ValidateTransitionDto};
use super::service;

#[utoipa::path(
    post,
    path = "/api/workflow/validate",
    request_body = ValidateTransitionDto,
    responses(
        (status = 200, description = "Validation outcome; blocked moves are reported, not rejected", body = ValidationReport),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Workflow",
    security(("bearer_auth" = []))
)]
pub async fn validate_transition(
    State(state): State<AppState>,
    RequireDocsView(caller): RequireDocsView,
    ValidatedJson(dto): ValidatedJson<ValidateTransitionDto>,
) -> Result<Json<ValidationReport>, AppError> {
    let actor = caller.user_id()?;
    let snapshot = state.workflow.snapshot();
    Ok(Json(service::validate(&snapshot.metadata, dto, actor)))
}

#[utoipa::path(
    get,
    path = "/api/workflow/transitions",
    params(TransitionsParams),
    responses(
        (status = 200, description = "Destinations configured from the step", body = Vec<AvailableTransition>),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Workflow",
    security(("bearer_auth" = []))
)]
pub async fn get_available_transitions(
    State(state): State<AppState>,
    _docs: RequireDocsView,
    Query(params): Query<TransitionsParams>,
) -> Json<Vec<AvailableTransition>> {
    let snapshot = state.workflow.snapshot();
    Json(service::transitions(
        &state.cache,
        &snapshot,
        params.doctype,
        params.from_step,
    ))
}
