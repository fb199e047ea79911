use std::env;
use std::path::PathBuf;

/// Bind address and the workflow snapshot the service starts from.
///
/// # Environment Variables
///
/// - `HOST` (default: `0.0.0.0`)
/// - `PORT` (default: `3000`)
/// - `WORKFLOW_METADATA_PATH`: JSON snapshot exported by the backend. When
///   unset the service starts with an empty workflow (fail-open).
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metadata_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            metadata_path: env::var("WORKFLOW_METADATA_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            metadata_path: None,
        }
    }
}
