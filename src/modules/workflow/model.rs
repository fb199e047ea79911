use aintar_models::{DocTypeId, Document, StepId, UserId};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_params"))]
pub struct ValidateTransitionDto {
    pub document: Document,
    /// Defaults to the document's current step.
    #[serde(default)]
    pub from_step: Option<StepId>,
    pub to_step: StepId,
    /// User who will receive the document.
    pub user_id: UserId,
}

impl ValidateTransitionDto {
    pub fn from_step(&self) -> StepId {
        self.from_step.unwrap_or(self.document.current_step)
    }
}

fn validate_params(dto: &ValidateTransitionDto) -> Result<(), ValidationError> {
    if dto.document.params.len() > 256 {
        return Err(ValidationError::new("too_many_params")
            .with_message("a document carries at most 256 parameters".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TransitionsParams {
    #[param(value_type = i32)]
    pub doctype: DocTypeId,
    #[param(value_type = i32)]
    pub from_step: StepId,
}
