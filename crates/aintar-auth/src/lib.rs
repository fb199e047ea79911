//! # AINTAR Auth
//!
//! Claims and JWT verification for callers of the rules service.
//!
//! - [`claims`]: the access-token claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use aintar_auth::verify_token;
//! use aintar_config::JwtConfig;
//!
//! let claims = verify_token(&token, &JwtConfig::from_env())?;
//! println!("User {} holds {:?}", claims.sub, claims.permissions);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
