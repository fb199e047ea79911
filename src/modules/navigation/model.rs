use aintar_core::{ModuleDefinition, PermissionId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModuleResponse {
    pub id: String,
    pub label: String,
    pub order: u16,
    pub icon: String,
    pub color: String,
    pub default_route: String,
    pub required_permissions: Vec<PermissionId>,
}

impl From<&ModuleDefinition> for ModuleResponse {
    fn from(module: &ModuleDefinition) -> Self {
        Self {
            id: module.id.to_string(),
            label: module.label.to_string(),
            order: module.order,
            icon: module.icon.to_string(),
            color: module.color.to_string(),
            default_route: module.default_route.to_string(),
            required_permissions: module.required_permissions.to_vec(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModulesResponse {
    pub modules: Vec<ModuleResponse>,
    /// Where to send the user after login. `None` when no module is visible.
    pub landing_route: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DetectParams {
    /// Pathname to classify, e.g. `/payments/123`.
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DetectResponse {
    pub path: String,
    pub module: Option<ModuleResponse>,
}
