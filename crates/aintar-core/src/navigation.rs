//! Navigation modules and route matching.
//!
//! The applications group their screens into top-level modules (operation,
//! requests, payments, ...). A module is shown when the user holds at least
//! one of its required permissions; modules without requirements are always
//! shown. Permission checks are passed in through [`PermissionCheck`] so the
//! filter stays a pure function of the catalog and the caller's strategy.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::permissions::{self, PermissionId};

/// Strategy used to answer "does the user hold this permission?".
pub trait PermissionCheck {
    fn has_permission(&self, permission: PermissionId) -> bool;

    fn has_any_permission(&self, permissions: &[PermissionId]) -> bool {
        permissions.iter().any(|p| self.has_permission(*p))
    }

    fn has_all_permissions(&self, permissions: &[PermissionId]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }
}

impl PermissionCheck for BTreeSet<PermissionId> {
    fn has_permission(&self, permission: PermissionId) -> bool {
        self.contains(&permission)
    }
}

impl PermissionCheck for HashSet<PermissionId> {
    fn has_permission(&self, permission: PermissionId) -> bool {
        self.contains(&permission)
    }
}

impl PermissionCheck for [PermissionId] {
    fn has_permission(&self, permission: PermissionId) -> bool {
        self.contains(&permission)
    }
}

impl PermissionCheck for Vec<PermissionId> {
    fn has_permission(&self, permission: PermissionId) -> bool {
        self.contains(&permission)
    }
}

impl<T: PermissionCheck + ?Sized> PermissionCheck for &T {
    fn has_permission(&self, permission: PermissionId) -> bool {
        (**self).has_permission(permission)
    }
}

/// Adapts a closure into a [`PermissionCheck`].
///
/// ```ignore
/// let admin = PermissionPredicate(|_: PermissionId| true);
/// let modules = accessible_modules(MODULES, &admin);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PermissionPredicate<F>(pub F);

impl<F> PermissionCheck for PermissionPredicate<F>
where
    F: Fn(PermissionId) -> bool,
{
    fn has_permission(&self, permission: PermissionId) -> bool {
        (self.0)(permission)
    }
}

/// A top-level navigation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub order: u16,
    pub icon: &'static str,
    pub color: &'static str,
    pub default_route: &'static str,
    /// Any one of these grants access. Empty means always accessible.
    pub required_permissions: &'static [PermissionId],
}

impl ModuleDefinition {
    /// Whether `checker` grants access to this module.
    pub fn is_accessible<C: PermissionCheck + ?Sized>(&self, checker: &C) -> bool {
        self.required_permissions.is_empty()
            || checker.has_any_permission(self.required_permissions)
    }
}

/// The AINTAR navigation modules.
pub static MODULES: &[ModuleDefinition] = &[
    ModuleDefinition {
        id: "dashboard",
        label: "Painel",
        order: 1,
        icon: "dashboard",
        color: "#1976d2",
        default_route: "/dashboard",
        required_permissions: &[],
    },
    ModuleDefinition {
        id: "administracao",
        label: "Administração",
        order: 90,
        icon: "admin_panel_settings",
        color: "#455a64",
        default_route: "/admin",
        required_permissions: &[
            permissions::ADMIN_DASHBOARD,
            permissions::ADMIN_USERS,
            permissions::ADMIN_SETTINGS,
        ],
    },
    ModuleDefinition {
        id: "operacao",
        label: "Operação",
        order: 2,
        icon: "engineering",
        color: "#2e7d32",
        default_route: "/operation",
        required_permissions: &[
            permissions::OPERATION_VIEW,
            permissions::TASKS_VIEW,
            permissions::ETAR_VIEW,
        ],
    },
    ModuleDefinition {
        id: "pedidos",
        label: "Pedidos",
        order: 3,
        icon: "description",
        color: "#6a1b9a",
        default_route: "/documents",
        required_permissions: &[permissions::DOCS_VIEW],
    },
    ModuleDefinition {
        id: "pagamentos",
        label: "Pagamentos",
        order: 4,
        icon: "payments",
        color: "#ef6c00",
        default_route: "/payments",
        required_permissions: &[permissions::PAYMENTS_VIEW],
    },
    ModuleDefinition {
        id: "entidades",
        label: "Entidades",
        order: 5,
        icon: "groups",
        color: "#00838f",
        default_route: "/entities",
        required_permissions: &[permissions::ENTITIES_VIEW],
    },
    ModuleDefinition {
        id: "relatorios",
        label: "Relatórios",
        order: 6,
        icon: "assessment",
        color: "#5d4037",
        default_route: "/reports",
        required_permissions: &[permissions::DASHBOARD_VIEW, permissions::REPORTS_VIEW],
    },
    ModuleDefinition {
        id: "epi",
        label: "EPI",
        order: 7,
        icon: "health_and_safety",
        color: "#c62828",
        default_route: "/epi",
        required_permissions: &[permissions::EPI_VIEW],
    },
];

/// Path prefix → module id, checked in order.
pub static ROUTE_PREFIXES: &[(&str, &str)] = &[
    ("/dashboard", "dashboard"),
    ("/operation", "operacao"),
    ("/tasks", "operacao"),
    ("/etar", "operacao"),
    ("/documents", "pedidos"),
    ("/payments", "pagamentos"),
    ("/entities", "entidades"),
    ("/reports", "relatorios"),
    ("/epi", "epi"),
    ("/admin", "administracao"),
    ("/settings", "administracao"),
    ("/users", "administracao"),
];

/// Modules `checker` may see, sorted by `order`.
pub fn accessible_modules<'a, C>(modules: &'a [ModuleDefinition], checker: &C) -> Vec<&'a ModuleDefinition>
where
    C: PermissionCheck + ?Sized,
{
    let mut visible: Vec<_> = modules
        .iter()
        .filter(|module| module.is_accessible(checker))
        .collect();
    visible.sort_by_key(|module| module.order);
    visible
}

/// Find a module by id.
pub fn module_by_id<'a>(modules: &'a [ModuleDefinition], id: &str) -> Option<&'a ModuleDefinition> {
    modules.iter().find(|module| module.id == id)
}

/// Route of the first module `checker` may see.
pub fn landing_route<C>(modules: &[ModuleDefinition], checker: &C) -> Option<&'static str>
where
    C: PermissionCheck + ?Sized,
{
    accessible_modules(modules, checker)
        .first()
        .map(|module| module.default_route)
}

/// Module id for a pathname, using [`ROUTE_PREFIXES`].
pub fn detect_module_from_path(path: &str) -> Option<&'static str> {
    detect_module_in(ROUTE_PREFIXES, path)
}

/// Module id for a pathname, first match over `prefixes`.
///
/// One trailing slash is dropped before matching. Matching is a plain
/// string prefix test, so `/tasks` also claims `/tasksx`.
pub fn detect_module_in(prefixes: &[(&str, &'static str)], path: &str) -> Option<&'static str> {
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };

    prefixes
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, module)| *module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::*;

    #[test]
    fn test_detect_module_from_path() {
        assert_eq!(detect_module_from_path("/tasks/123"), Some("operacao"));
        assert_eq!(detect_module_from_path("/tasks/"), Some("operacao"));
        assert_eq!(detect_module_from_path("/tasks"), Some("operacao"));
        assert_eq!(detect_module_from_path("/payments/42/receipt"), Some("pagamentos"));
        assert_eq!(detect_module_from_path("/unknown"), None);
    }

    #[test]
    fn test_detect_module_is_plain_prefix_match() {
        assert_eq!(detect_module_from_path("/tasksx"), Some("operacao"));
        assert_eq!(detect_module_from_path("/epic"), Some("epi"));
        assert_eq!(detect_module_from_path("/task"), None);
        assert_eq!(detect_module_from_path("/"), None);
        assert_eq!(detect_module_from_path(""), None);
    }

    #[test]
    fn test_detect_module_first_match_wins() {
        let prefixes: &[(&str, &'static str)] = &[("/a", "first"), ("/a/b", "second")];
        assert_eq!(detect_module_in(prefixes, "/a/b/c"), Some("first"));
    }

    #[test]
    fn test_only_one_trailing_slash_is_normalized() {
        assert_eq!(detect_module_from_path("/tasks//"), Some("operacao"));
        let prefixes: &[(&str, &'static str)] = &[("/x", "x")];
        assert_eq!(detect_module_in(prefixes, "/x//"), Some("x"));
    }

    #[test]
    fn test_accessible_modules_sorted_by_order() {
        let all = PermissionPredicate(|_: PermissionId| true);
        let modules = accessible_modules(MODULES, &all);
        assert_eq!(modules.len(), MODULES.len());
        assert!(modules.windows(2).all(|w| w[0].order <= w[1].order));
        assert_eq!(modules.last().map(|m| m.id), Some("administracao"));
    }

    #[test]
    fn test_modules_without_requirements_always_visible() {
        let none = PermissionPredicate(|_: PermissionId| false);
        let modules = accessible_modules(MODULES, &none);
        assert_eq!(modules.iter().map(|m| m.id).collect::<Vec<_>>(), vec!["dashboard"]);
    }

    #[test]
    fn test_any_required_permission_grants_access() {
        let held: BTreeSet<PermissionId> = [TASKS_VIEW, PAYMENTS_VIEW].into_iter().collect();
        let modules = accessible_modules(MODULES, &held);
        let ids: Vec<_> = modules.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["dashboard", "operacao", "pagamentos"]);
        assert!(modules.iter().all(|m| m.is_accessible(&held)));
    }

    #[test]
    fn test_landing_route_and_lookup() {
        let held = vec![DOCS_VIEW];
        let restricted: Vec<ModuleDefinition> = MODULES
            .iter()
            .copied()
            .filter(|m| !m.required_permissions.is_empty())
            .collect();
        assert_eq!(landing_route(&restricted, &held), Some("/documents"));
        assert_eq!(module_by_id(MODULES, "epi").map(|m| m.order), Some(7));
        assert!(module_by_id(MODULES, "missing").is_none());
    }

    #[test]
    fn test_prefix_table_points_at_known_modules() {
        for (_, module) in ROUTE_PREFIXES {
            assert!(module_by_id(MODULES, module).is_some(), "unknown module {module}");
        }
    }
}
