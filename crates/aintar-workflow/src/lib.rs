//! # AINTAR Workflow
//!
//! Advisory validation of document moves between workflow steps, evaluated
//! against a [`WorkflowMetadata`](aintar_models::WorkflowMetadata) snapshot.
//!
//! # Modules
//!
//! - [`validator`]: [`validate_transition`] and the parameter key tables
//! - [`outcome`]: errors, warnings, required actions and the report shape
//! - [`available`]: destinations offered from a step
//!
//! # Example
//!
//! ```ignore
//! use aintar_workflow::validate_transition;
//!
//! let result = validate_transition(&document, from, to, user, &metadata);
//! if !result.can_proceed {
//!     for error in &result.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

pub mod available;
pub mod outcome;
pub mod validator;

pub use available::{AvailableTransition, available_transitions};
pub use outcome::{
    ReportEntry, RequiredAction, TransitionError, TransitionValidation, TransitionWarning,
    ValidationReport,
};
pub use validator::validate_transition;
