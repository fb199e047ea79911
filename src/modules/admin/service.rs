use std::io;

use aintar_cache::{LockError, QueueError, keys};
use aintar_core::AppError;
use aintar_models::WorkflowMetadata;
use anyhow::anyhow;
use tracing::{info, instrument, warn};

use crate::state::{AppState, WorkflowSnapshot};

use super::model::{MetadataSummary, ReloadResponse};

/// Lock key serializing metadata reloads.
pub const RELOAD_LOCK_KEY: &str = "metadata-reload";

pub fn summary(state: &AppState) -> MetadataSummary {
    MetadataSummary::from(state.workflow.snapshot().metadata.as_ref())
}

/// Re-read the snapshot file and swap it in.
///
/// The old snapshot stays active when the file cannot be read or parsed, or
/// when its dependency table has a cycle. A missing file is reported at once
/// as `400`; other read failures are retried.
#[instrument(skip(state))]
pub async fn reload_metadata(state: &AppState, holder: &str) -> Result<ReloadResponse, AppError> {
    let path = state
        .server_config
        .metadata_path
        .clone()
        .ok_or_else(|| AppError::bad_request(anyhow!("WORKFLOW_METADATA_PATH is not configured")))?;

    let _guard = state
        .locks
        .acquire_guard(RELOAD_LOCK_KEY, holder)
        .map_err(|e| match e {
            LockError::Held { .. } => AppError::conflict(e),
            other => AppError::internal(other),
        })?;

    let json = state
        .queue
        .run_retrying_if(
            || tokio::fs::read_to_string(&path),
            |e: &io::Error| e.kind() != io::ErrorKind::NotFound,
        )
        .await
        .map_err(|e| match e {
            QueueError::Exhausted { last, .. } if last.kind() == io::ErrorKind::NotFound => {
                AppError::bad_request(anyhow!(
                    "Workflow metadata file {} not found",
                    path.display()
                ))
            }
            other => AppError::internal(anyhow!(
                "Failed to read workflow metadata from {}: {}",
                path.display(),
                other
            )),
        })?;

    let metadata = WorkflowMetadata::from_json_str(&json).map_err(AppError::unprocessable)?;
    let snapshot = WorkflowSnapshot::new(metadata)?;
    let summary = MetadataSummary::from(snapshot.metadata.as_ref());
    for issue in &summary.issues {
        warn!(issue = %issue, "Workflow metadata issue");
    }

    let generation = state.workflow.replace(snapshot);

    let invalidated = state
        .cache
        .invalidate_prefix(&keys::permissions::invalidation_prefix())
        + state
            .cache
            .invalidate_prefix(&keys::metadata::invalidation_prefix());

    info!(
        path = %path.display(),
        steps = summary.steps,
        transitions = summary.transitions,
        generation,
        invalidated,
        "Workflow metadata reloaded"
    );

    Ok(ReloadResponse {
        message: "Workflow metadata reloaded".to_string(),
        summary,
        invalidated,
    })
}
