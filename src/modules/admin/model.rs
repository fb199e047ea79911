use aintar_models::WorkflowMetadata;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MetadataSummary {
    pub steps: usize,
    pub users: usize,
    pub transitions: usize,
    pub doc_types: usize,
    /// Consistency problems in the snapshot; empty when sound.
    pub issues: Vec<String>,
}

impl From<&WorkflowMetadata> for MetadataSummary {
    fn from(metadata: &WorkflowMetadata) -> Self {
        Self {
            steps: metadata.steps.len(),
            users: metadata.users.len(),
            transitions: metadata.transitions.len(),
            doc_types: metadata.doc_types.len(),
            issues: metadata.check().iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: MetadataSummary,
    /// Cache entries dropped by the reload.
    pub invalidated: usize,
}
