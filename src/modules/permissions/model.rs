use aintar_core::{PermissionCategory, PermissionId, PermissionInfo, PermissionSet};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionResponse {
    pub id: PermissionId,
    pub name: String,
    pub description: String,
    pub category: PermissionCategory,
    pub category_label: String,
    pub is_critical: bool,
    pub is_sensitive: bool,
}

impl From<&PermissionInfo> for PermissionResponse {
    fn from(info: &PermissionInfo) -> Self {
        Self {
            id: info.id,
            name: info.name.to_string(),
            description: info.description.to_string(),
            category: info.category,
            category_label: info.category.label().to_string(),
            is_critical: info.is_critical,
            is_sensitive: info.is_sensitive,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionDetailResponse {
    #[serde(flatten)]
    pub permission: PermissionResponse,
    /// Direct prerequisites.
    pub requires: Vec<PermissionId>,
    /// Every prerequisite, transitively.
    pub resolved_dependencies: Vec<PermissionId>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PermissionFilterParams {
    /// Only permissions of this category
    pub category: Option<PermissionCategory>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PermissionSetDto {
    #[validate(length(max = 512, message = "Too many permissions in one request"))]
    pub permissions: Vec<PermissionId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedPermissionsResponse {
    pub granted: Vec<PermissionId>,
    pub resolved: Vec<PermissionId>,
    /// Prerequisites that were not granted directly.
    pub implied: Vec<PermissionId>,
}

impl ResolvedPermissionsResponse {
    pub fn new(granted: &PermissionSet, resolved: &PermissionSet) -> Self {
        Self {
            granted: granted.iter().copied().collect(),
            resolved: resolved.iter().copied().collect(),
            implied: resolved.difference(granted).copied().collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DependentsDto {
    pub permission: PermissionId,
    #[validate(length(max = 512, message = "Too many permissions in one request"))]
    pub permissions: Vec<PermissionId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DependentsResponse {
    pub permission: PermissionId,
    pub dependents: Vec<PermissionId>,
}

/// One editor action on a permission set.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PermissionEditDto {
    pub permission: PermissionId,
    #[validate(length(max = 512, message = "Too many permissions in one request"))]
    pub permissions: Vec<PermissionId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionEditResponse {
    pub permissions: Vec<PermissionId>,
    pub added: Vec<PermissionId>,
    pub removed: Vec<PermissionId>,
}

impl PermissionEditResponse {
    pub fn new(before: &PermissionSet, after: &PermissionSet) -> Self {
        Self {
            permissions: after.iter().copied().collect(),
            added: after.difference(before).copied().collect(),
            removed: before.difference(after).copied().collect(),
        }
    }
}
