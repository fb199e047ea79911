//! # AINTAR Rules API
//!
//! HTTP service exposing the permission, navigation and workflow rules used
//! by the AINTAR applications. It holds no database: identities come from
//! bearer tokens issued by the backend and the workflow comes from a
//! metadata snapshot exported by it.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Bearer token extractor and permission guards
//! ├── modules/          # Feature modules
//! │   ├── permissions/ # Catalog, dependency resolution, editor cascade
//! │   ├── navigation/  # Accessible modules and route detection
//! │   ├── workflow/    # Transition validation and available moves
//! │   ├── admin/       # Metadata snapshot reload
//! │   └── health/      # Liveness
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Main router, CORS and request logging
//! ├── state.rs          # Shared state and the swappable snapshot
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: rules glue over the workspace crates
//! - `model.rs`: request and response DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Permissions
//!
//! Access tokens carry the permission ids granted by the backend. On every
//! request they are closed under their prerequisites (see
//! [`aintar_core::DependencyGraph`]), so holding `TASKS_CREATE` implies
//! `TASKS_VIEW`. The resolved set is cached per user and grant list.
//!
//! ## Configuration
//!
//! ```bash
//! JWT_SECRET=shared-with-the-backend
//! WORKFLOW_METADATA_PATH=/etc/aintar/metadata.json
//! HOST=0.0.0.0
//! PORT=3000
//! LOG_FORMAT=json
//! ```
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use aintar_auth;
pub use aintar_cache;
pub use aintar_config;
pub use aintar_core;
pub use aintar_models;
pub use aintar_workflow;
