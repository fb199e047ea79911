use std::env;
use tracing::warn;

const DEV_SECRET: &str = "aintar-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 secret shared with the backend that issues the tokens.
    pub secret: String,
    /// Lifetime in seconds of tokens minted locally (CLI, tests).
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using the development secret");
            DEV_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: 3600,
        }
    }
}
