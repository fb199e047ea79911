//! Outcome types of a transition validation.
//!
//! Outcomes are data: hard errors block the move, warnings are advisories and
//! required actions are suggested fixes. None of them is raised as a Rust
//! error.

use aintar_models::UserId;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A reason the move is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Moving from \"{from}\" to \"{to}\" is not permitted for this document type")]
    TransitionNotPermitted { from: String, to: String },

    #[error("User {user} may not receive documents in \"{to}\"")]
    UserNotAuthorized { user: UserId, to: String },

    #[error("Documents cannot return to the entry step \"{to}\"")]
    ReturnToEntry { to: String },

    #[error("\"{from}\" is a final step; documents cannot leave it")]
    LeavingTerminal { from: String },

    #[error("The document is already assigned to user {user}")]
    SelfTransfer { user: UserId },

    #[error("User {user} does not exist")]
    UnknownUser { user: UserId },

    #[error("User {user} is inactive")]
    InactiveUser { user: UserId },
}

impl TransitionError {
    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::TransitionNotPermitted { .. } => "transition_not_permitted",
            TransitionError::UserNotAuthorized { .. } => "user_not_authorized",
            TransitionError::ReturnToEntry { .. } => "return_to_entry",
            TransitionError::LeavingTerminal { .. } => "leaving_terminal",
            TransitionError::SelfTransfer { .. } => "self_transfer",
            TransitionError::UnknownUser { .. } => "unknown_user",
            TransitionError::InactiveUser { .. } => "inactive_user",
        }
    }
}

/// A non-blocking advisory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionWarning {
    #[error("No workflow is configured; the move is allowed without checks")]
    NoWorkflowConfigured,

    #[error("\"{to}\" is a billing step but the document has no value parameter")]
    MissingBillingValue { to: String },

    #[error("\"{to}\" usually needs measurement parameters")]
    MissingMeasurements { to: String },

    #[error("\"{to}\" usually needs location data")]
    MissingLocation { to: String },

    #[error("The document stays in \"{step}\"; only the assignee changes")]
    RemainsInCurrentStep { step: String },
}

impl TransitionWarning {
    pub fn code(&self) -> &'static str {
        match self {
            TransitionWarning::NoWorkflowConfigured => "no_workflow_configured",
            TransitionWarning::MissingBillingValue { .. } => "missing_billing_value",
            TransitionWarning::MissingMeasurements { .. } => "missing_measurements",
            TransitionWarning::MissingLocation { .. } => "missing_location",
            TransitionWarning::RemainsInCurrentStep { .. } => "remains_in_current_step",
        }
    }
}

/// Suggested remediation. Never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredAction {
    EnterBillingValue,
    RecordMeasurements,
    RecordLocation,
}

impl RequiredAction {
    pub fn code(self) -> &'static str {
        match self {
            RequiredAction::EnterBillingValue => "enter_billing_value",
            RequiredAction::RecordMeasurements => "record_measurements",
            RequiredAction::RecordLocation => "record_location",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RequiredAction::EnterBillingValue => "Add the amount to charge to the document",
            RequiredAction::RecordMeasurements => "Record the site measurements",
            RequiredAction::RecordLocation => "Record the address or coordinates",
        }
    }
}

/// Result of [`validate_transition`](crate::validate_transition).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionValidation {
    /// A transition was found and the target user is authorized.
    pub is_valid: bool,
    /// `is_valid` and no hard errors.
    pub can_proceed: bool,
    pub warnings: Vec<TransitionWarning>,
    pub errors: Vec<TransitionError>,
    pub required_actions: Vec<RequiredAction>,
}

impl TransitionValidation {
    pub(crate) fn error(&mut self, error: TransitionError) {
        self.errors.push(error);
    }

    pub(crate) fn warn(&mut self, warning: TransitionWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn require(&mut self, action: RequiredAction) {
        if !self.required_actions.contains(&action) {
            self.required_actions.push(action);
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.can_proceed = self.is_valid && self.errors.is_empty();
        self
    }

    /// Serializable form for API responses and CLI output.
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            is_valid: self.is_valid,
            can_proceed: self.can_proceed,
            errors: self
                .errors
                .iter()
                .map(|e| ReportEntry::new(e.code(), e.to_string()))
                .collect(),
            warnings: self
                .warnings
                .iter()
                .map(|w| ReportEntry::new(w.code(), w.to_string()))
                .collect(),
            required_actions: self
                .required_actions
                .iter()
                .map(|a| ReportEntry::new(a.code(), a.description().to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportEntry {
    pub code: &'static str,
    pub message: String,
}

impl ReportEntry {
    fn new(code: &'static str, message: String) -> Self {
        Self { code, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub can_proceed: bool,
    pub errors: Vec<ReportEntry>,
    pub warnings: Vec<ReportEntry>,
    pub required_actions: Vec<ReportEntry>,
}
