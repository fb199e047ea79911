use aintar_core::navigation::{self, MODULES};
use aintar_core::{AppError, PermissionCheck};
use anyhow::anyhow;

use super::model::{DetectResponse, ModuleResponse, ModulesResponse};

pub fn list_all_modules() -> Vec<ModuleResponse> {
    let mut modules: Vec<ModuleResponse> = MODULES.iter().map(ModuleResponse::from).collect();
    modules.sort_by_key(|module| module.order);
    modules
}

/// Modules visible to `checker` plus the landing route.
pub fn modules_for<C: PermissionCheck + ?Sized>(checker: &C) -> ModulesResponse {
    let modules = navigation::accessible_modules(MODULES, checker)
        .into_iter()
        .map(ModuleResponse::from)
        .collect();

    ModulesResponse {
        modules,
        landing_route: navigation::landing_route(MODULES, checker).map(str::to_string),
    }
}

pub fn detect(path: &str) -> DetectResponse {
    let module = navigation::detect_module_from_path(path)
        .and_then(|id| navigation::module_by_id(MODULES, id))
        .map(ModuleResponse::from);

    DetectResponse {
        path: path.to_string(),
        module,
    }
}

pub fn get_module(id: &str) -> Result<ModuleResponse, AppError> {
    navigation::module_by_id(MODULES, id)
        .map(ModuleResponse::from)
        .ok_or_else(|| AppError::not_found(anyhow!("Module {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aintar_core::permissions::{ADMIN_DASHBOARD, EPI_VIEW, PAYMENTS_VIEW};
    use aintar_core::{PermissionId, PermissionPredicate, PermissionSet};

    #[test]
    fn test_empty_set_only_sees_unrestricted_modules() {
        let response = modules_for(&PermissionSet::new());
        assert!(
            response
                .modules
                .iter()
                .all(|module| module.required_permissions.is_empty())
        );
    }

    #[test]
    fn test_modules_follow_order() {
        let everything = PermissionPredicate(|_: PermissionId| true);
        let response = modules_for(&everything);
        assert_eq!(response.modules.len(), MODULES.len());
        assert!(response.modules.windows(2).all(|w| w[0].order <= w[1].order));
        assert_eq!(
            response.landing_route.as_deref(),
            Some(response.modules[0].default_route.as_str())
        );
    }

    #[test]
    fn test_single_permission_lands_in_its_module() {
        let held: PermissionSet = [EPI_VIEW].into_iter().collect();
        let response = modules_for(&held);
        assert!(response.modules.iter().any(|m| m.id == "epi"));
        assert!(!response.modules.iter().any(|m| m.id == "pagamentos"));

        let held: PermissionSet = [PAYMENTS_VIEW, ADMIN_DASHBOARD].into_iter().collect();
        let ids: Vec<_> = modules_for(&held).modules.into_iter().map(|m| m.id).collect();
        assert!(ids.contains(&"pagamentos".to_string()));
        assert!(ids.contains(&"administracao".to_string()));
    }

    #[test]
    fn test_detect_known_and_unknown_paths() {
        let response = detect("/payments/42");
        assert_eq!(response.module.map(|m| m.id).as_deref(), Some("pagamentos"));

        assert!(detect("/pay").module.is_none());
        assert!(detect("/").module.is_none());
    }

    #[test]
    fn test_get_unknown_module() {
        let err = get_module("nope").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
