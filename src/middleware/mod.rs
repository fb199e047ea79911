//! Request extractors for authentication and authorization.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` issued by the backend
//! 2. [`auth::AuthUser`] verifies the JWT and resolves the granted
//!    permissions against the current dependency graph (cached per user)
//! 3. Permission extractors such as [`auth::RequireAdminSettings`] reject
//!    with `403` when the resolved set lacks their permission
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireAdminSettings};
//!
//! async fn modules(auth_user: AuthUser) -> impl IntoResponse {
//!     accessible_modules(MODULES, &auth_user)
//! }
//!
//! async fn reload(RequireAdminSettings(admin): RequireAdminSettings) -> impl IntoResponse {
//!     // Only runs with ADMIN_SETTINGS
//! }
//! ```

pub mod auth;
