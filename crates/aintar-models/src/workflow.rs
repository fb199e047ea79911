//! Workflow metadata: steps, transitions, the user roster and document types.
//!
//! The backend owns the workflow and exports it as a snapshot. The rules in
//! `aintar-workflow` only read this snapshot; nothing here mutates backend
//! state.
//!
//! Steps carry an explicit [`StepKind`]. Older snapshots only have display
//! names, so when `kind` is missing it is derived once from the name at load
//! time (see [`StepKind::from_name`]).

use aintar_core::dependencies::{DependencyEdge, DependencyError, DependencyGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::ids::{DocTypeId, StepId, UserId};
use crate::text::fold_label;

/// Stable classification of a workflow step, used by the transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Where requests are registered.
    Entry,
    /// Concluded or cancelled; requests never leave it.
    Terminal,
    /// Charging / payment collection.
    Billing,
    /// Budget preparation; expects measurements.
    Budgeting,
    /// On-site assessment; expects location data.
    FieldAssessment,
    Standard,
}

impl StepKind {
    /// Derive a kind from a legacy display name.
    ///
    /// Matching is case- and accent-insensitive, so "Concluído" and
    /// "CONCLUIDO" are both terminal.
    ///
    /// A step gets exactly one kind, checked in the order entry, terminal,
    /// billing, budgeting, field assessment. A name matching several
    /// fragments keeps only the first: "PAGAMENTO CONCLUÍDO" is terminal, so
    /// moves into it get no billing warning. Give such steps an explicit
    /// `kind` in the snapshot.
    pub fn from_name(name: &str) -> Self {
        let name = fold_label(name);

        if name.contains("ENTRADA") {
            StepKind::Entry
        } else if name.contains("CONCLUIDO") || name.contains("ANULADO") {
            StepKind::Terminal
        } else if name.contains("COBRANCA") || name.contains("PAGAMENTO") {
            StepKind::Billing
        } else if name.contains("ORCAMENTACAO") {
            StepKind::Budgeting
        } else if name.contains("AVALIACAO") && name.contains("TERRENO") {
            StepKind::FieldAssessment
        } else {
            StepKind::Standard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkflowStep {
    pub id: StepId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StepKind>,
}

impl WorkflowStep {
    /// The configured kind, or the one derived from the name.
    pub fn resolved_kind(&self) -> StepKind {
        self.kind.unwrap_or_else(|| StepKind::from_name(&self.name))
    }
}

fn default_active() -> bool {
    true
}

/// Roster entry for a staff member who can hold documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkflowUser {
    pub id: UserId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentType {
    pub id: DocTypeId,
    pub name: String,
}

/// Users allowed to receive a document through a transition.
///
/// The backend sends either a single user id or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AllowedClients {
    One(UserId),
    Many(Vec<UserId>),
}

impl AllowedClients {
    pub fn contains(&self, user: UserId) -> bool {
        match self {
            AllowedClients::One(id) => *id == user,
            AllowedClients::Many(ids) => ids.contains(&user),
        }
    }

    pub fn to_vec(&self) -> Vec<UserId> {
        match self {
            AllowedClients::One(id) => vec![*id],
            AllowedClients::Many(ids) => ids.clone(),
        }
    }
}

/// A configured move between two steps for one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StepTransition {
    pub doctype: DocTypeId,
    pub from_step: StepId,
    pub to_step: StepId,
    #[serde(alias = "clients")]
    pub client: AllowedClients,
}

/// Problems found by [`WorkflowMetadata::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataIssue {
    #[error("step {0} is defined more than once")]
    DuplicateStep(StepId),

    #[error("transition #{index} references unknown step {step}")]
    UnknownStep { index: usize, step: StepId },

    #[error("transition #{index} references unknown document type {doctype}")]
    UnknownDocType { index: usize, doctype: DocTypeId },

    #[error("transition #{index} allows unknown user {user}")]
    UnknownClient { index: usize, user: UserId },

    #[error("configured entry step {0} is not an entry step")]
    EntryStepKind(StepId),

    #[error(transparent)]
    Dependencies(#[from] DependencyError),
}

/// Errors loading a metadata snapshot.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid metadata snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Workflow snapshot exported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkflowMetadata {
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub users: Vec<WorkflowUser>,
    #[serde(default)]
    pub transitions: Vec<StepTransition>,
    #[serde(default)]
    pub doc_types: Vec<DocumentType>,
    /// Canonical entry step. Defaults to the first step of kind `Entry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_step: Option<StepId>,
    /// Overrides the built-in permission dependency table when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_dependencies: Vec<DependencyEdge>,
}

impl WorkflowMetadata {
    /// Parse a snapshot and fill in step kinds missing from it.
    pub fn from_json_str(json: &str) -> Result<Self, MetadataError> {
        let mut metadata: WorkflowMetadata = serde_json::from_str(json)?;
        metadata.derive_missing_kinds();
        debug!(
            steps = metadata.steps.len(),
            users = metadata.users.len(),
            transitions = metadata.transitions.len(),
            "Loaded workflow metadata"
        );
        Ok(metadata)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set `kind` on steps that lack it, from their display names.
    pub fn derive_missing_kinds(&mut self) {
        for step in self.steps.iter_mut().filter(|s| s.kind.is_none()) {
            let kind = StepKind::from_name(&step.name);
            if kind != StepKind::Standard {
                warn!(
                    step_id = %step.id,
                    step_name = %step.name,
                    kind = ?kind,
                    "Step kind derived from display name; set `kind` in the snapshot"
                );
            }
            step.kind = Some(kind);
        }
    }

    pub fn step(&self, id: StepId) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Kind of a step; unknown steps are `Standard`.
    pub fn step_kind(&self, id: StepId) -> StepKind {
        self.step(id)
            .map(WorkflowStep::resolved_kind)
            .unwrap_or(StepKind::Standard)
    }

    pub fn step_name(&self, id: StepId) -> String {
        self.step(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn user(&self, id: UserId) -> Option<&WorkflowUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The canonical entry step.
    pub fn entry_step(&self) -> Option<StepId> {
        self.entry_step.or_else(|| {
            self.steps
                .iter()
                .find(|s| s.resolved_kind() == StepKind::Entry)
                .map(|s| s.id)
        })
    }

    /// Transitions matching `(doctype, from, to)` exactly.
    pub fn transitions_between(
        &self,
        doctype: DocTypeId,
        from: StepId,
        to: StepId,
    ) -> impl Iterator<Item = &StepTransition> {
        self.transitions
            .iter()
            .filter(move |t| t.doctype == doctype && t.from_step == from && t.to_step == to)
    }

    /// Transitions leaving `from` for one document type.
    pub fn transitions_from(
        &self,
        doctype: DocTypeId,
        from: StepId,
    ) -> impl Iterator<Item = &StepTransition> {
        self.transitions
            .iter()
            .filter(move |t| t.doctype == doctype && t.from_step == from)
    }

    /// The permission dependency graph this snapshot asks for.
    pub fn dependency_graph(&self) -> Result<DependencyGraph, DependencyError> {
        if self.permission_dependencies.is_empty() {
            Ok(DependencyGraph::aintar())
        } else {
            DependencyGraph::from_config(&self.permission_dependencies)
        }
    }

    /// Consistency report. An empty result means the snapshot is sound.
    pub fn check(&self) -> Vec<MetadataIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id) {
                issues.push(MetadataIssue::DuplicateStep(step.id));
            }
        }

        let users: HashSet<UserId> = self.users.iter().map(|u| u.id).collect();
        let doc_types: HashSet<DocTypeId> = self.doc_types.iter().map(|d| d.id).collect();

        for (index, transition) in self.transitions.iter().enumerate() {
            for step in [transition.from_step, transition.to_step] {
                if !seen.contains(&step) {
                    issues.push(MetadataIssue::UnknownStep { index, step });
                }
            }
            if !doc_types.is_empty() && !doc_types.contains(&transition.doctype) {
                issues.push(MetadataIssue::UnknownDocType {
                    index,
                    doctype: transition.doctype,
                });
            }
            for user in transition.client.to_vec() {
                if !users.contains(&user) {
                    issues.push(MetadataIssue::UnknownClient { index, user });
                }
            }
        }

        if let Some(entry) = self.entry_step {
            if self.step_kind(entry) != StepKind::Entry {
                issues.push(MetadataIssue::EntryStepKind(entry));
            }
        }

        if let Err(err) = self.dependency_graph() {
            issues.push(err.into());
        }

        issues
    }
}
