use std::sync::{Arc, PoisonError, RwLock};

use aintar_cache::{CacheConfig, CacheManager, OperationLockManager, RequestQueue};
use aintar_config::{CorsConfig, JwtConfig, ServerConfig};
use aintar_core::{DependencyError, DependencyGraph};
use aintar_models::WorkflowMetadata;
use anyhow::Context;
use tracing::{info, warn};

/// The workflow snapshot and the dependency graph built from it.
///
/// Handlers take a cheap clone and work on it without holding any lock.
/// Anything cached from a snapshot is keyed on its `generation`, so results
/// computed from a replaced snapshot are never read back.
#[derive(Clone, Debug)]
pub struct WorkflowSnapshot {
    pub metadata: Arc<WorkflowMetadata>,
    pub graph: Arc<DependencyGraph>,
    /// Bumped by [`WorkflowStore::replace`].
    pub generation: u64,
}

impl WorkflowSnapshot {
    pub fn new(metadata: WorkflowMetadata) -> Result<Self, DependencyError> {
        let graph = metadata.dependency_graph()?;
        Ok(Self {
            metadata: Arc::new(metadata),
            graph: Arc::new(graph),
            generation: 0,
        })
    }
}

/// Swappable holder for the current [`WorkflowSnapshot`].
#[derive(Debug)]
pub struct WorkflowStore {
    current: RwLock<WorkflowSnapshot>,
}

impl WorkflowStore {
    pub fn new(snapshot: WorkflowSnapshot) -> Self {
        Self {
            current: RwLock::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in `snapshot` as the next generation and return that generation.
    pub fn replace(&self, mut snapshot: WorkflowSnapshot) -> u64 {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        snapshot.generation = current.generation + 1;
        *current = snapshot;
        current.generation
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub workflow: Arc<WorkflowStore>,
    pub cache: Arc<CacheManager>,
    pub locks: Arc<OperationLockManager>,
    pub queue: RequestQueue,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// Build the state around an already loaded snapshot.
    pub fn new(
        metadata: WorkflowMetadata,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        server_config: ServerConfig,
        cache_config: &CacheConfig,
    ) -> Result<Self, DependencyError> {
        let snapshot = WorkflowSnapshot::new(metadata)?;

        Ok(Self {
            workflow: Arc::new(WorkflowStore::new(snapshot)),
            cache: Arc::new(CacheManager::new(cache_config.default_ttl())),
            locks: Arc::new(OperationLockManager::new(cache_config.lock_timeout())),
            queue: RequestQueue::new(cache_config.queue_concurrency, cache_config.retry_policy()),
            jwt_config,
            cors_config,
            server_config,
        })
    }
}

/// Load configuration from the environment and the initial snapshot.
///
/// Without `WORKFLOW_METADATA_PATH` the service starts with an empty
/// workflow, where every move is allowed with a warning.
pub fn init_app_state() -> anyhow::Result<AppState> {
    let server_config = ServerConfig::from_env();

    let metadata = match &server_config.metadata_path {
        Some(path) => {
            let metadata = WorkflowMetadata::load(path)
                .with_context(|| format!("Failed to load workflow metadata from {}", path.display()))?;
            for issue in metadata.check() {
                warn!(issue = %issue, "Workflow metadata issue");
            }
            info!(
                path = %path.display(),
                steps = metadata.steps.len(),
                transitions = metadata.transitions.len(),
                "Workflow metadata loaded"
            );
            metadata
        }
        None => {
            warn!("WORKFLOW_METADATA_PATH not set, starting with an empty workflow");
            WorkflowMetadata::default()
        }
    };

    AppState::new(
        metadata,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        server_config,
        &CacheConfig::from_env(),
    )
    .context("Invalid permission dependency table")
}
