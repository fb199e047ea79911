//! JWT claim structure for access tokens issued by the AINTAR backend.

use aintar_core::PermissionId;
use aintar_models::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// The backend embeds the user's granted permission ids; the rules service
/// never looks them up elsewhere.
///
/// # Fields
///
/// - `sub`: numeric user id, as a string
/// - `name`: display name
/// - `permissions`: granted permission ids (not yet dependency-resolved)
/// - `exp`: expiration timestamp
/// - `iat`: issued-at timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// The subject as a user id, if it is numeric.
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}
