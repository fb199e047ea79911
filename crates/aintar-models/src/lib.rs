//! # AINTAR Models
//!
//! Domain models shared by the rules service, the CLI and the workflow
//! validator.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed integer ids
//! - [`documents`]: the document a transition applies to
//! - [`workflow`]: steps, transitions, roster and the metadata snapshot
//! - [`text`]: label folding used for name matching
//!
//! # Example
//!
//! ```ignore
//! use aintar_models::{WorkflowMetadata, StepKind};
//!
//! let metadata = WorkflowMetadata::load("metadata.json")?;
//! if metadata.step_kind(step) == StepKind::Terminal {
//!     println!("Request is closed");
//! }
//! ```

pub mod documents;
pub mod ids;
pub mod text;
pub mod workflow;

// Re-export commonly used types at crate root for convenience
pub use documents::{Document, DocumentParam};
pub use ids::{DocTypeId, DocumentId, StepId, UserId};
pub use workflow::{
    AllowedClients, DocumentType, MetadataError, MetadataIssue, StepKind, StepTransition,
    WorkflowMetadata, WorkflowStep, WorkflowUser,
};
