//! JWT utilities.
//!
//! Tokens are HS256-signed by the backend with a shared secret. The service
//! only verifies them; [`create_access_token`] exists for the CLI and tests.
//!
//! # Example
//!
//! ```ignore
//! use aintar_auth::{create_access_token, verify_token};
//! use aintar_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(UserId(42), "Ana", vec![TASKS_VIEW], &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use aintar_config::JwtConfig;
use aintar_core::{AppError, PermissionId};
use aintar_models::UserId;

use crate::claims::Claims;

/// Creates an access token carrying `permissions`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: UserId,
    name: &str,
    permissions: Vec<PermissionId>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        permissions,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::Error::new(e).context("Failed to create token")))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token rejected");
        AppError::unauthorized("Invalid or expired token")
    })
}
