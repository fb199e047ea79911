//! CLI commands. Each returns a report implementing `Display` and
//! `Serialize`.

use std::fmt;
use std::path::Path;

use aintar_core::navigation::{self, MODULES};
use aintar_core::permissions::{self, PermissionId};
use aintar_core::{DependencyGraph, PermissionSet};
use aintar_models::{
    DocTypeId, Document, StepId, StepKind, UserId, WorkflowMetadata, WorkflowStep,
};
use aintar_workflow::{AvailableTransition, ValidationReport};
use anyhow::Context;
use serde::Serialize;
use tracing::{debug, warn};

/// Load a snapshot, or the empty workflow when no path is given.
pub fn load_metadata(path: Option<&Path>) -> anyhow::Result<WorkflowMetadata> {
    match path {
        Some(path) => WorkflowMetadata::load(path)
            .with_context(|| format!("Failed to load workflow metadata from {}", path.display())),
        None => {
            warn!("No metadata file given, using the built-in dependency table and no workflow");
            Ok(WorkflowMetadata::default())
        }
    }
}

fn label(id: PermissionId) -> String {
    match permissions::describe(id) {
        Some(info) => format!("{:>4}  {}", id, info.name),
        None => format!("{:>4}  (unknown)", id),
    }
}

fn write_permissions(f: &mut fmt::Formatter<'_>, ids: &[PermissionId]) -> fmt::Result {
    if ids.is_empty() {
        return writeln!(f, "  (none)");
    }
    for id in ids {
        writeln!(f, "  {}", label(*id))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub granted: Vec<PermissionId>,
    pub resolved: Vec<PermissionId>,
    /// Added by dependency resolution.
    pub implied: Vec<PermissionId>,
}

pub fn resolve(graph: &DependencyGraph, ids: &[u32]) -> ResolveReport {
    let granted: PermissionSet = ids.iter().copied().map(PermissionId).collect();
    let resolved = graph.resolve_all(granted.iter().copied());
    let implied = resolved.difference(&granted).copied().collect();

    ResolveReport {
        granted: granted.into_iter().collect(),
        resolved: resolved.into_iter().collect(),
        implied,
    }
}

impl fmt::Display for ResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Effective permissions ({}):", self.resolved.len())?;
        write_permissions(f, &self.resolved)?;
        writeln!(f, "Implied by dependencies ({}):", self.implied.len())?;
        write_permissions(f, &self.implied)
    }
}

#[derive(Debug, Serialize)]
pub struct DependentsReport {
    pub permission: PermissionId,
    pub dependents: Vec<PermissionId>,
}

pub fn dependents(graph: &DependencyGraph, permission: u32, held: &[u32]) -> DependentsReport {
    let permission = PermissionId(permission);
    let held: PermissionSet = held.iter().copied().map(PermissionId).collect();

    DependentsReport {
        permission,
        dependents: graph.dependents(permission, &held).into_iter().collect(),
    }
}

impl fmt::Display for DependentsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Held permissions requiring {}:", label(self.permission).trim_start())?;
        write_permissions(f, &self.dependents)
    }
}

#[derive(Debug, Serialize)]
pub struct ModuleLine {
    pub id: &'static str,
    pub label: &'static str,
    pub default_route: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModulesReport {
    pub modules: Vec<ModuleLine>,
    pub landing_route: Option<&'static str>,
}

/// Modules visible to a user granted `ids`, after dependency resolution.
pub fn modules(graph: &DependencyGraph, ids: &[u32]) -> ModulesReport {
    let held = graph.resolve_all(ids.iter().copied().map(PermissionId));

    ModulesReport {
        modules: navigation::accessible_modules(MODULES, &held)
            .into_iter()
            .map(|module| ModuleLine {
                id: module.id,
                label: module.label,
                default_route: module.default_route,
            })
            .collect(),
        landing_route: navigation::landing_route(MODULES, &held),
    }
}

impl fmt::Display for ModulesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accessible modules ({}):", self.modules.len())?;
        for module in &self.modules {
            writeln!(
                f,
                "  {:<14} {:<16} {}",
                module.id, module.label, module.default_route
            )?;
        }
        match self.landing_route {
            Some(route) => writeln!(f, "Landing route: {}", route),
            None => writeln!(f, "Landing route: (none)"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetectReport {
    pub path: String,
    pub module: Option<&'static str>,
}

pub fn detect(path: &str) -> DetectReport {
    DetectReport {
        path: path.to_string(),
        module: navigation::detect_module_from_path(path),
    }
}

impl fmt::Display for DetectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module {
            Some(module) => writeln!(f, "{} -> {}", self.path, module),
            None => writeln!(f, "{} -> (no module)", self.path),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ValidateReport(pub ValidationReport);

/// Validate moving the document in `document_path` to `to`.
///
/// `actor` stands in for the document's owner when the file has none.
pub fn validate(
    metadata: &WorkflowMetadata,
    document_path: &Path,
    from: Option<i32>,
    to: i32,
    user: i64,
    actor: Option<i64>,
) -> anyhow::Result<ValidateReport> {
    let json = std::fs::read_to_string(document_path)
        .with_context(|| format!("Failed to read document {}", document_path.display()))?;
    let mut document: Document = serde_json::from_str(&json)
        .with_context(|| format!("Invalid document {}", document_path.display()))?;
    if document.owner.is_none() {
        document.owner = actor.map(UserId);
    }

    let from = from.map(StepId).unwrap_or(document.current_step);
    let validation =
        aintar_workflow::validate_transition(&document, from, StepId(to), UserId(user), metadata);

    Ok(ValidateReport(validation.report()))
}

impl ValidateReport {
    pub fn can_proceed(&self) -> bool {
        self.0.can_proceed
    }
}

impl fmt::Display for ValidateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        if report.can_proceed {
            writeln!(f, "✅ Transition allowed")?;
        } else {
            writeln!(f, "❌ Transition blocked")?;
        }
        for entry in &report.errors {
            writeln!(f, "  error   [{}] {}", entry.code, entry.message)?;
        }
        for entry in &report.warnings {
            writeln!(f, "  warning [{}] {}", entry.code, entry.message)?;
        }
        for entry in &report.required_actions {
            writeln!(f, "  action  [{}] {}", entry.code, entry.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TransitionsReport(pub Vec<AvailableTransition>);

pub fn transitions(metadata: &WorkflowMetadata, doctype: i32, from: i32) -> TransitionsReport {
    TransitionsReport(aintar_workflow::available_transitions(
        DocTypeId(doctype),
        StepId(from),
        metadata,
    ))
}

impl fmt::Display for TransitionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No transitions configured from this step");
        }
        for transition in &self.0 {
            let clients: Vec<String> = transition.clients.iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "  -> {:>3} {:<28} {:<16} users: {}",
                transition.to_step,
                transition.name,
                format!("{:?}", transition.kind),
                clients.join(", ")
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DerivedKind {
    pub step: StepId,
    pub name: String,
    pub kind: StepKind,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub steps: usize,
    pub users: usize,
    pub transitions: usize,
    pub issues: Vec<String>,
    /// Steps whose kind was missing and derived from the display name.
    pub derived_kinds: Vec<DerivedKind>,
}

impl CheckReport {
    pub fn is_sound(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Sanity report for a snapshot file.
pub fn check(path: &Path) -> anyhow::Result<CheckReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    // Parsed raw so the steps lacking a kind are still visible.
    let mut metadata: WorkflowMetadata = serde_json::from_str(&json)
        .with_context(|| format!("Invalid metadata snapshot {}", path.display()))?;

    let untagged: Vec<StepId> = metadata
        .steps
        .iter()
        .filter(|step| step.kind.is_none())
        .map(|step| step.id)
        .collect();
    metadata.derive_missing_kinds();

    let derived_kinds = metadata
        .steps
        .iter()
        .filter(|step| untagged.contains(&step.id))
        .map(|step: &WorkflowStep| DerivedKind {
            step: step.id,
            name: step.name.clone(),
            kind: step.resolved_kind(),
        })
        .collect();

    let issues: Vec<String> = metadata.check().iter().map(ToString::to_string).collect();
    debug!(issues = issues.len(), "Checked workflow metadata");

    Ok(CheckReport {
        steps: metadata.steps.len(),
        users: metadata.users.len(),
        transitions: metadata.transitions.len(),
        issues,
        derived_kinds,
    })
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} steps, {} users, {} transitions",
            self.steps, self.users, self.transitions
        )?;
        if !self.derived_kinds.is_empty() {
            writeln!(f, "Kinds derived from step names:")?;
            for derived in &self.derived_kinds {
                writeln!(f, "  {:>3} {:<28} {:?}", derived.step, derived.name, derived.kind)?;
            }
        }
        if self.issues.is_empty() {
            writeln!(f, "✅ No issues found")
        } else {
            writeln!(f, "❌ {} issue(s):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - {}", issue)?;
            }
            Ok(())
        }
    }
}
