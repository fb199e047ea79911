use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use aintar_core::{DependencyEdge, PermissionCategory};
use aintar_models::{Document, DocumentParam, StepKind};
use aintar_workflow::{AvailableTransition, ReportEntry, ValidationReport};

use crate::modules::admin::model::{MetadataSummary, ReloadResponse};
use crate::modules::health::controller::HealthResponse;
use crate::modules::navigation::model::{DetectResponse, ModuleResponse, ModulesResponse};
use crate::modules::permissions::model::{
    DependentsDto, DependentsResponse, PermissionDetailResponse, PermissionEditDto,
    PermissionEditResponse, PermissionResponse, PermissionSetDto, ResolvedPermissionsResponse,
};
use crate::modules::workflow::model::ValidateTransitionDto;

/// Body of every non-2xx response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Access denied. Missing required permission: 13")]
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::get_my_permissions,
        crate::modules::permissions::controller::get_permission_by_id,
        crate::modules::permissions::controller::resolve_permissions,
        crate::modules::permissions::controller::get_dependents,
        crate::modules::permissions::controller::grant_permission,
        crate::modules::permissions::controller::revoke_permission,
        crate::modules::navigation::controller::get_my_modules,
        crate::modules::navigation::controller::get_all_modules,
        crate::modules::navigation::controller::get_module_by_id,
        crate::modules::navigation::controller::detect_module,
        crate::modules::workflow::controller::validate_transition,
        crate::modules::workflow::controller::get_available_transitions,
        crate::modules::admin::controller::get_metadata_summary,
        crate::modules::admin::controller::reload_metadata,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            PermissionCategory,
            PermissionResponse,
            PermissionDetailResponse,
            PermissionSetDto,
            ResolvedPermissionsResponse,
            DependentsDto,
            DependentsResponse,
            PermissionEditDto,
            PermissionEditResponse,
            DependencyEdge,
            ModuleResponse,
            ModulesResponse,
            DetectResponse,
            Document,
            DocumentParam,
            StepKind,
            ValidateTransitionDto,
            ValidationReport,
            ReportEntry,
            AvailableTransition,
            MetadataSummary,
            ReloadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Permissions", description = "Permission catalog, dependency resolution and the editor cascade"),
        (name = "Navigation", description = "Module access and route matching"),
        (name = "Workflow", description = "Document transition rules"),
        (name = "Admin", description = "Workflow metadata administration")
    ),
    info(
        title = "AINTAR Rules API",
        version = "0.1.0",
        description = "Permission, navigation and workflow rules for the AINTAR applications.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
