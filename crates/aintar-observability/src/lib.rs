//! # AINTAR Observability
//!
//! Structured logging for the rules service and its CLI.
//!
//! - [`init_logging`]: installs the `tracing` subscriber (console, optional
//!   rolling file)
//! - [`logging_middleware`]: per-request log lines with a request id
//!
//! # Example
//!
//! ```no_run
//! use aintar_config::LoggingConfig;
//! use aintar_observability::init_logging;
//!
//! let _guard = init_logging(&LoggingConfig::from_env()).expect("logging");
//! tracing::info!("ready");
//! ```

pub mod logging;
pub mod middleware;

pub use logging::init_logging;
pub use middleware::{REQUEST_ID_HEADER, logging_middleware};
