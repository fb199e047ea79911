//! # AINTAR Core
//!
//! Permission and navigation rules shared by the AINTAR applications.
//!
//! - [`permissions`]: the permission catalog and its dependency table
//! - [`dependencies`]: transitive prerequisite resolution and the permission
//!   editor cascade (grant / revoke)
//! - [`navigation`]: module access filtering and pathname → module matching
//! - [`errors`]: the HTTP-facing [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use aintar_core::{DependencyGraph, accessible_modules, MODULES};
//! use aintar_core::permissions::TASKS_CREATE;
//!
//! let graph = DependencyGraph::default();
//! let held = graph.resolve_all([TASKS_CREATE]);
//! let modules = accessible_modules(MODULES, &held);
//! ```

pub mod dependencies;
pub mod errors;
pub mod navigation;
pub mod permissions;

// Re-export commonly used types at crate root
pub use dependencies::{DependencyEdge, DependencyError, DependencyGraph, PermissionSet};
pub use errors::AppError;
pub use navigation::{
    MODULES, ModuleDefinition, PermissionCheck, PermissionPredicate, ROUTE_PREFIXES,
    accessible_modules, detect_module_from_path,
};
pub use permissions::{PermissionCategory, PermissionId, PermissionInfo};
