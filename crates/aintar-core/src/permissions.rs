//! Permission catalog for the AINTAR applications.
//!
//! Permissions are numeric identifiers assigned to users by the backend. The
//! catalog below is fixed at build time: each entry carries a display name,
//! a description, a category and the `is_critical` / `is_sensitive` flags the
//! administration screens use to highlight dangerous grants.
//!
//! # Example
//!
//! ```ignore
//! use aintar_core::permissions::{self, PermissionId};
//!
//! if user.has_permission(permissions::TASKS_CREATE) {
//!     // Show the "new task" button
//! }
//!
//! let info = permissions::describe(PermissionId(200)).unwrap();
//! assert_eq!(info.name, "Ver tarefas");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Numeric permission identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u32, example = 200)]
pub struct PermissionId(pub u32);

impl PermissionId {
    /// Get the raw numeric code.
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PermissionId {
    #[inline]
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<PermissionId> for u32 {
    #[inline]
    fn from(id: PermissionId) -> u32 {
        id.0
    }
}

/// Grouping used by the permission editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    Administration,
    Operation,
    Tasks,
    Documents,
    Payments,
    Entities,
    Reports,
    Equipment,
}

impl PermissionCategory {
    /// All categories in editor display order.
    pub const ALL: [PermissionCategory; 8] = [
        PermissionCategory::Administration,
        PermissionCategory::Operation,
        PermissionCategory::Tasks,
        PermissionCategory::Documents,
        PermissionCategory::Payments,
        PermissionCategory::Entities,
        PermissionCategory::Reports,
        PermissionCategory::Equipment,
    ];

    /// Display label shown to staff.
    pub const fn label(self) -> &'static str {
        match self {
            PermissionCategory::Administration => "Administração",
            PermissionCategory::Operation => "Operação",
            PermissionCategory::Tasks => "Tarefas",
            PermissionCategory::Documents => "Pedidos",
            PermissionCategory::Payments => "Pagamentos",
            PermissionCategory::Entities => "Entidades",
            PermissionCategory::Reports => "Relatórios",
            PermissionCategory::Equipment => "Equipamento",
        }
    }
}

/// Static description of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionInfo {
    pub id: PermissionId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PermissionCategory,
    pub is_critical: bool,
    pub is_sensitive: bool,
}

impl PermissionInfo {
    const fn new(
        id: PermissionId,
        name: &'static str,
        description: &'static str,
        category: PermissionCategory,
    ) -> Self {
        Self {
            id,
            name,
            description,
            category,
            is_critical: false,
            is_sensitive: false,
        }
    }

    const fn critical(self) -> Self {
        Self {
            is_critical: true,
            ..self
        }
    }

    const fn sensitive(self) -> Self {
        Self {
            is_sensitive: true,
            ..self
        }
    }
}

// =============================================================================
// Administration permissions
// =============================================================================

/// Access to the administration area
pub const ADMIN_DASHBOARD: PermissionId = PermissionId(10);
/// Manage staff accounts
pub const ADMIN_USERS: PermissionId = PermissionId(11);
/// Assign and revoke permissions
pub const ADMIN_PERMISSIONS: PermissionId = PermissionId(12);
/// Change application settings and reload workflow metadata
pub const ADMIN_SETTINGS: PermissionId = PermissionId(13);
/// Read audit logs
pub const ADMIN_LOGS: PermissionId = PermissionId(14);

// =============================================================================
// Operation permissions
// =============================================================================

/// View field operation routes
pub const OPERATION_VIEW: PermissionId = PermissionId(100);
/// Execute and record field operations
pub const OPERATION_EXECUTE: PermissionId = PermissionId(101);
/// Supervise operators and validate executions
pub const OPERATION_SUPERVISE: PermissionId = PermissionId(102);
/// View treatment plant (ETAR) installations
pub const ETAR_VIEW: PermissionId = PermissionId(110);
/// Edit treatment plant (ETAR) installations
pub const ETAR_EDIT: PermissionId = PermissionId(111);

// =============================================================================
// Tasks permissions
// =============================================================================

/// View tasks
pub const TASKS_VIEW: PermissionId = PermissionId(200);
/// Create tasks
pub const TASKS_CREATE: PermissionId = PermissionId(201);
/// Edit tasks
pub const TASKS_EDIT: PermissionId = PermissionId(202);
/// Assign tasks to other staff
pub const TASKS_ASSIGN: PermissionId = PermissionId(203);
/// Delete tasks
pub const TASKS_DELETE: PermissionId = PermissionId(204);

// =============================================================================
// Documents permissions
// =============================================================================

/// View requests and documents
pub const DOCS_VIEW: PermissionId = PermissionId(300);
/// Register new requests
pub const DOCS_CREATE: PermissionId = PermissionId(301);
/// Edit request parameters and move requests between steps
pub const DOCS_EDIT: PermissionId = PermissionId(302);
/// Reassign requests to another staff member
pub const DOCS_TRANSFER: PermissionId = PermissionId(303);
/// Cancel requests
pub const DOCS_CANCEL: PermissionId = PermissionId(304);

// =============================================================================
// Payments permissions
// =============================================================================

/// View payments
pub const PAYMENTS_VIEW: PermissionId = PermissionId(400);
/// Register payments
pub const PAYMENTS_PROCESS: PermissionId = PermissionId(401);
/// Validate registered payments
pub const PAYMENTS_VALIDATE: PermissionId = PermissionId(402);
/// Handle cash payments at the counter
pub const PAYMENTS_CASH: PermissionId = PermissionId(403);

// =============================================================================
// Entities permissions
// =============================================================================

/// View entities (customers)
pub const ENTITIES_VIEW: PermissionId = PermissionId(500);
/// Create entities
pub const ENTITIES_CREATE: PermissionId = PermissionId(501);
/// Edit entities
pub const ENTITIES_EDIT: PermissionId = PermissionId(502);
/// See tax numbers and contact details
pub const ENTITIES_PERSONAL_DATA: PermissionId = PermissionId(503);

// =============================================================================
// Reports permissions
// =============================================================================

/// View dashboards
pub const DASHBOARD_VIEW: PermissionId = PermissionId(600);
/// View reports
pub const REPORTS_VIEW: PermissionId = PermissionId(610);
/// Export reports
pub const REPORTS_EXPORT: PermissionId = PermissionId(611);

// =============================================================================
// Equipment permissions
// =============================================================================

/// View protective equipment (EPI) deliveries
pub const EPI_VIEW: PermissionId = PermissionId(700);
/// Register and manage protective equipment (EPI) deliveries
pub const EPI_MANAGE: PermissionId = PermissionId(701);

use PermissionCategory as C;

/// Every permission known to the applications.
pub static CATALOG: &[PermissionInfo] = &[
    PermissionInfo::new(ADMIN_DASHBOARD, "Administração", "Acesso à área de administração", C::Administration),
    PermissionInfo::new(ADMIN_USERS, "Gerir utilizadores", "Criar e desativar contas de colaboradores", C::Administration).critical(),
    PermissionInfo::new(ADMIN_PERMISSIONS, "Gerir permissões", "Atribuir e revogar permissões", C::Administration).critical().sensitive(),
    PermissionInfo::new(ADMIN_SETTINGS, "Configurações", "Alterar configurações e recarregar metadados", C::Administration).critical(),
    PermissionInfo::new(ADMIN_LOGS, "Registos de auditoria", "Consultar registos de auditoria", C::Administration).sensitive(),
    PermissionInfo::new(OPERATION_VIEW, "Ver operação", "Consultar rotas de operação", C::Operation),
    PermissionInfo::new(OPERATION_EXECUTE, "Executar operação", "Registar execuções no terreno", C::Operation),
    PermissionInfo::new(OPERATION_SUPERVISE, "Supervisionar operação", "Validar execuções dos operadores", C::Operation),
    PermissionInfo::new(ETAR_VIEW, "Ver ETAR", "Consultar instalações de tratamento", C::Operation),
    PermissionInfo::new(ETAR_EDIT, "Editar ETAR", "Alterar dados das instalações de tratamento", C::Operation),
    PermissionInfo::new(TASKS_VIEW, "Ver tarefas", "Consultar tarefas", C::Tasks),
    PermissionInfo::new(TASKS_CREATE, "Criar tarefas", "Registar novas tarefas", C::Tasks),
    PermissionInfo::new(TASKS_EDIT, "Editar tarefas", "Alterar tarefas existentes", C::Tasks),
    PermissionInfo::new(TASKS_ASSIGN, "Atribuir tarefas", "Atribuir tarefas a outros colaboradores", C::Tasks),
    PermissionInfo::new(TASKS_DELETE, "Eliminar tarefas", "Eliminar tarefas", C::Tasks).critical(),
    PermissionInfo::new(DOCS_VIEW, "Ver pedidos", "Consultar pedidos", C::Documents),
    PermissionInfo::new(DOCS_CREATE, "Criar pedidos", "Registar novos pedidos", C::Documents),
    PermissionInfo::new(DOCS_EDIT, "Editar pedidos", "Alterar parâmetros e mover pedidos entre passos", C::Documents),
    PermissionInfo::new(DOCS_TRANSFER, "Transferir pedidos", "Reatribuir pedidos a outro colaborador", C::Documents),
    PermissionInfo::new(DOCS_CANCEL, "Anular pedidos", "Anular pedidos", C::Documents).critical(),
    PermissionInfo::new(PAYMENTS_VIEW, "Ver pagamentos", "Consultar pagamentos", C::Payments).sensitive(),
    PermissionInfo::new(PAYMENTS_PROCESS, "Registar pagamentos", "Registar pagamentos", C::Payments).critical().sensitive(),
    PermissionInfo::new(PAYMENTS_VALIDATE, "Validar pagamentos", "Validar pagamentos registados", C::Payments).critical().sensitive(),
    PermissionInfo::new(PAYMENTS_CASH, "Pagamentos em numerário", "Receber pagamentos ao balcão", C::Payments).critical().sensitive(),
    PermissionInfo::new(ENTITIES_VIEW, "Ver entidades", "Consultar entidades", C::Entities),
    PermissionInfo::new(ENTITIES_CREATE, "Criar entidades", "Registar novas entidades", C::Entities),
    PermissionInfo::new(ENTITIES_EDIT, "Editar entidades", "Alterar entidades", C::Entities),
    PermissionInfo::new(ENTITIES_PERSONAL_DATA, "Dados pessoais", "Consultar NIF e contactos das entidades", C::Entities).sensitive(),
    PermissionInfo::new(DASHBOARD_VIEW, "Ver painéis", "Consultar painéis de indicadores", C::Reports),
    PermissionInfo::new(REPORTS_VIEW, "Ver relatórios", "Consultar relatórios", C::Reports),
    PermissionInfo::new(REPORTS_EXPORT, "Exportar relatórios", "Exportar relatórios", C::Reports),
    PermissionInfo::new(EPI_VIEW, "Ver EPI", "Consultar entregas de equipamento de proteção", C::Equipment),
    PermissionInfo::new(EPI_MANAGE, "Gerir EPI", "Registar entregas de equipamento de proteção", C::Equipment),
];

/// Prerequisites for each permission. Permissions missing here have none.
pub static DEFAULT_DEPENDENCIES: &[(PermissionId, &[PermissionId])] = &[
    (ADMIN_USERS, &[ADMIN_DASHBOARD]),
    (ADMIN_PERMISSIONS, &[ADMIN_USERS]),
    (ADMIN_SETTINGS, &[ADMIN_DASHBOARD]),
    (ADMIN_LOGS, &[ADMIN_DASHBOARD]),
    (OPERATION_EXECUTE, &[OPERATION_VIEW]),
    (OPERATION_SUPERVISE, &[OPERATION_EXECUTE]),
    (ETAR_EDIT, &[ETAR_VIEW]),
    (TASKS_CREATE, &[TASKS_VIEW]),
    (TASKS_EDIT, &[TASKS_VIEW]),
    (TASKS_ASSIGN, &[TASKS_EDIT]),
    (TASKS_DELETE, &[TASKS_EDIT]),
    (DOCS_CREATE, &[DOCS_VIEW]),
    (DOCS_EDIT, &[DOCS_VIEW]),
    (DOCS_TRANSFER, &[DOCS_EDIT]),
    (DOCS_CANCEL, &[DOCS_EDIT]),
    (PAYMENTS_PROCESS, &[PAYMENTS_VIEW, DOCS_VIEW]),
    (PAYMENTS_VALIDATE, &[PAYMENTS_PROCESS]),
    (PAYMENTS_CASH, &[PAYMENTS_PROCESS]),
    (ENTITIES_CREATE, &[ENTITIES_VIEW]),
    (ENTITIES_EDIT, &[ENTITIES_VIEW]),
    (ENTITIES_PERSONAL_DATA, &[ENTITIES_VIEW]),
    (REPORTS_VIEW, &[DASHBOARD_VIEW]),
    (REPORTS_EXPORT, &[REPORTS_VIEW]),
    (EPI_MANAGE, &[EPI_VIEW]),
];

/// Look up a permission by id.
pub fn describe(id: PermissionId) -> Option<&'static PermissionInfo> {
    CATALOG.iter().find(|info| info.id == id)
}

/// Permissions of one category, in catalog order.
pub fn by_category(category: PermissionCategory) -> impl Iterator<Item = &'static PermissionInfo> {
    CATALOG.iter().filter(move |info| info.category == category)
}

/// Permissions flagged as critical.
pub fn critical() -> impl Iterator<Item = &'static PermissionInfo> {
    CATALOG.iter().filter(|info| info.is_critical)
}

/// Permissions flagged as sensitive.
pub fn sensitive() -> impl Iterator<Item = &'static PermissionInfo> {
    CATALOG.iter().filter(|info| info.is_sensitive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        for info in CATALOG {
            assert!(seen.insert(info.id), "duplicate permission id {}", info.id);
        }
    }

    #[test]
    fn test_dependencies_reference_catalog_entries() {
        for (permission, requires) in DEFAULT_DEPENDENCIES {
            assert!(describe(*permission).is_some(), "unknown {}", permission);
            for dep in *requires {
                assert!(describe(*dep).is_some(), "unknown dependency {}", dep);
            }
        }
    }

    #[test]
    fn test_describe_known_and_unknown() {
        assert_eq!(describe(TASKS_VIEW).map(|i| i.name), Some("Ver tarefas"));
        assert!(describe(PermissionId(9999)).is_none());
    }

    #[test]
    fn test_by_category_filters() {
        let payments: Vec<_> = by_category(PermissionCategory::Payments).collect();
        assert_eq!(payments.len(), 4);
        assert!(payments.iter().all(|i| i.category == PermissionCategory::Payments));
    }

    #[test]
    fn test_flags() {
        assert!(critical().any(|i| i.id == PAYMENTS_PROCESS));
        assert!(sensitive().any(|i| i.id == ENTITIES_PERSONAL_DATA));
        assert!(!critical().any(|i| i.id == TASKS_VIEW));
    }

    #[test]
    fn test_permission_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TASKS_VIEW).unwrap(), "200");
        let parsed: PermissionId = serde_json::from_str("201").unwrap();
        assert_eq!(parsed, TASKS_CREATE);
    }
}
