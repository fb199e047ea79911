//! Permission dependency resolution.
//!
//! Some permissions only make sense together with others: creating a task
//! requires seeing tasks, validating a payment requires registering one.
//! [`DependencyGraph`] holds those `permission → prerequisite` edges and
//! answers the questions the permission editor and the session layer ask:
//!
//! - [`DependencyGraph::resolve_dependencies`]: every prerequisite of a
//!   permission, direct or transitive
//! - [`DependencyGraph::resolve_all`]: a permission set closed under its
//!   prerequisites
//! - [`DependencyGraph::dependents`]: which held permissions would lose a
//!   prerequisite if one were revoked
//!
//! Graphs built from configuration are rejected when they contain a cycle.
//!
//! # Example
//!
//! ```ignore
//! use aintar_core::dependencies::DependencyGraph;
//! use aintar_core::permissions::{TASKS_CREATE, TASKS_VIEW};
//!
//! let graph = DependencyGraph::default();
//! let resolved = graph.resolve_all([TASKS_CREATE]);
//! assert!(resolved.contains(&TASKS_VIEW));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

use crate::permissions::{DEFAULT_DEPENDENCIES, PermissionId};

/// A set of permissions with deterministic iteration order.
pub type PermissionSet = BTreeSet<PermissionId>;

/// Errors raised while building a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("permission dependency cycle: {}", format_path(.path))]
    Cycle { path: Vec<PermissionId> },
}

fn format_path(path: &[PermissionId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One configured edge list: `permission` requires every id in `requires`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DependencyEdge {
    pub permission: PermissionId,
    #[serde(default)]
    pub requires: Vec<PermissionId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Directed acyclic graph of permission prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<PermissionId, PermissionSet>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::aintar()
    }
}

impl DependencyGraph {
    /// Build a graph from `(permission, prerequisites)` pairs.
    ///
    /// Repeated permissions are merged. Returns [`DependencyError::Cycle`]
    /// if any permission (transitively) requires itself.
    pub fn new<I, D>(edges: I) -> Result<Self, DependencyError>
    where
        I: IntoIterator<Item = (PermissionId, D)>,
        D: IntoIterator<Item = PermissionId>,
    {
        let graph = Self::from_edges(edges);
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// Build a graph from configuration edge lists.
    pub fn from_config(edges: &[DependencyEdge]) -> Result<Self, DependencyError> {
        Self::new(
            edges
                .iter()
                .map(|edge| (edge.permission, edge.requires.iter().copied())),
        )
    }

    /// The built-in AINTAR dependency table.
    ///
    /// The table is static and covered by tests, so it skips the cycle check.
    pub fn aintar() -> Self {
        Self::from_edges(
            DEFAULT_DEPENDENCIES
                .iter()
                .map(|(permission, requires)| (*permission, requires.iter().copied())),
        )
    }

    fn from_edges<I, D>(edges: I) -> Self
    where
        I: IntoIterator<Item = (PermissionId, D)>,
        D: IntoIterator<Item = PermissionId>,
    {
        let mut map: BTreeMap<PermissionId, PermissionSet> = BTreeMap::new();
        for (permission, requires) in edges {
            map.entry(permission).or_default().extend(requires);
        }
        Self { edges: map }
    }

    /// Edge lists in permission order, suitable for serialization.
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.edges
            .iter()
            .map(|(permission, requires)| DependencyEdge {
                permission: *permission,
                requires: requires.iter().copied().collect(),
            })
            .collect()
    }

    /// Direct prerequisites of `permission`.
    pub fn direct(&self, permission: PermissionId) -> impl Iterator<Item = PermissionId> + '_ {
        self.edges
            .get(&permission)
            .into_iter()
            .flat_map(|requires| requires.iter().copied())
    }

    /// Every prerequisite of `permission`, excluding the permission itself.
    ///
    /// Unknown permissions have no prerequisites. The visited set stops the
    /// walk at any permission already seen.
    pub fn resolve_dependencies(&self, permission: PermissionId) -> PermissionSet {
        let mut visited = PermissionSet::new();
        let mut stack = vec![permission];

        while let Some(current) = stack.pop() {
            for dep in self.direct(current) {
                if visited.insert(dep) {
                    stack.push(dep);
                }
            }
        }

        visited.remove(&permission);
        visited
    }

    /// The given permissions plus all of their prerequisites.
    pub fn resolve_all<I>(&self, permissions: I) -> PermissionSet
    where
        I: IntoIterator<Item = PermissionId>,
    {
        let mut resolved = PermissionSet::new();
        for permission in permissions {
            if resolved.insert(permission) {
                resolved.extend(self.resolve_dependencies(permission));
            }
        }
        resolved
    }

    /// Permissions in `current` that (transitively) require `permission`.
    pub fn dependents(&self, permission: PermissionId, current: &PermissionSet) -> PermissionSet {
        current
            .iter()
            .copied()
            .filter(|candidate| *candidate != permission)
            .filter(|candidate| self.resolve_dependencies(*candidate).contains(&permission))
            .collect()
    }

    /// Add `permission` and everything it requires to `current`.
    pub fn grant(&self, current: &PermissionSet, permission: PermissionId) -> PermissionSet {
        let mut next = current.clone();
        next.insert(permission);
        next.extend(self.resolve_dependencies(permission));
        debug!(
            permission = %permission,
            added = next.len() - current.len(),
            "Granted permission with dependencies"
        );
        next
    }

    /// Remove `permission` and every held permission that depends on it.
    pub fn revoke(&self, current: &PermissionSet, permission: PermissionId) -> PermissionSet {
        let cascade = self.dependents(permission, current);
        let next: PermissionSet = current
            .iter()
            .copied()
            .filter(|p| *p != permission && !cascade.contains(p))
            .collect();
        debug!(
            permission = %permission,
            removed = current.len() - next.len(),
            "Revoked permission with dependents"
        );
        next
    }

    /// For each permission in `current`, the prerequisites it is missing.
    ///
    /// Permissions with every prerequisite present are omitted.
    pub fn missing_dependencies(
        &self,
        current: &PermissionSet,
    ) -> BTreeMap<PermissionId, PermissionSet> {
        current
            .iter()
            .filter_map(|permission| {
                let missing: PermissionSet = self
                    .resolve_dependencies(*permission)
                    .difference(current)
                    .copied()
                    .collect();
                (!missing.is_empty()).then_some((*permission, missing))
            })
            .collect()
    }

    /// Fail with the first cycle found, as a path that starts and ends on
    /// the same permission.
    pub fn check_acyclic(&self) -> Result<(), DependencyError> {
        let mut marks: BTreeMap<PermissionId, Mark> = BTreeMap::new();
        let mut path = Vec::new();

        for start in self.edges.keys() {
            if !marks.contains_key(start) {
                self.visit(*start, &mut marks, &mut path)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        node: PermissionId,
        marks: &mut BTreeMap<PermissionId, Mark>,
        path: &mut Vec<PermissionId>,
    ) -> Result<(), DependencyError> {
        marks.insert(node, Mark::Visiting);
        path.push(node);

        for dep in self.direct(node) {
            match marks.get(&dep) {
                Some(Mark::Done) => {}
                Some(Mark::Visiting) => {
                    let start = path.iter().position(|p| *p == dep).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(dep);
                    return Err(DependencyError::Cycle { path: cycle });
                }
                None => self.visit(dep, marks, path)?,
            }
        }

        path.pop();
        marks.insert(node, Mark::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::*;
    use proptest::prelude::*;

    fn set(ids: &[PermissionId]) -> PermissionSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_default_graph_is_acyclic() {
        assert!(DependencyGraph::aintar().check_acyclic().is_ok());
    }

    #[test]
    fn test_unknown_permission_has_no_dependencies() {
        let graph = DependencyGraph::default();
        assert!(graph.resolve_dependencies(PermissionId(9999)).is_empty());
        assert!(graph.resolve_dependencies(TASKS_VIEW).is_empty());
    }

    #[test]
    fn test_tasks_create_requires_tasks_view() {
        let graph = DependencyGraph::default();
        assert_eq!(
            graph.resolve_all([TASKS_CREATE]),
            set(&[TASKS_CREATE, TASKS_VIEW])
        );
    }

    #[test]
    fn test_transitive_dependencies_exclude_self() {
        let graph = DependencyGraph::default();
        let deps = graph.resolve_dependencies(PAYMENTS_VALIDATE);
        assert_eq!(deps, set(&[PAYMENTS_PROCESS, PAYMENTS_VIEW, DOCS_VIEW]));
        assert!(!deps.contains(&PAYMENTS_VALIDATE));
    }

    #[test]
    fn test_shared_dependencies_are_deduplicated() {
        let graph = DependencyGraph::new([
            (PermissionId(1), vec![PermissionId(2), PermissionId(3)]),
            (PermissionId(2), vec![PermissionId(4)]),
            (PermissionId(3), vec![PermissionId(4)]),
        ])
        .unwrap();
        assert_eq!(
            graph.resolve_dependencies(PermissionId(1)),
            set(&[PermissionId(2), PermissionId(3), PermissionId(4)])
        );
    }

    #[test]
    fn test_cycle_is_rejected_with_path() {
        let err = DependencyGraph::new([
            (PermissionId(1), vec![PermissionId(2)]),
            (PermissionId(2), vec![PermissionId(3)]),
            (PermissionId(3), vec![PermissionId(1)]),
        ])
        .unwrap_err();
        let DependencyError::Cycle { path } = err;
        assert_eq!(path.first(), path.last());
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_self_dependency_is_rejected() {
        let result = DependencyGraph::new([(PermissionId(7), vec![PermissionId(7)])]);
        assert_eq!(
            result.unwrap_err(),
            DependencyError::Cycle {
                path: vec![PermissionId(7), PermissionId(7)]
            }
        );
    }

    #[test]
    fn test_from_config_merges_repeated_entries() {
        let graph = DependencyGraph::from_config(&[
            DependencyEdge {
                permission: PermissionId(1),
                requires: vec![PermissionId(2)],
            },
            DependencyEdge {
                permission: PermissionId(1),
                requires: vec![PermissionId(3)],
            },
        ])
        .unwrap();
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(
            graph.direct(PermissionId(1)).collect::<Vec<_>>(),
            vec![PermissionId(2), PermissionId(3)]
        );
    }

    #[test]
    fn test_dependents_only_from_current_set() {
        let graph = DependencyGraph::default();
        let current = set(&[TASKS_VIEW, TASKS_CREATE, TASKS_EDIT, TASKS_ASSIGN, DOCS_VIEW]);
        assert_eq!(
            graph.dependents(TASKS_VIEW, &current),
            set(&[TASKS_CREATE, TASKS_EDIT, TASKS_ASSIGN])
        );
        assert_eq!(graph.dependents(TASKS_EDIT, &current), set(&[TASKS_ASSIGN]));
        assert!(graph.dependents(DOCS_VIEW, &current).is_empty());
    }

    #[test]
    fn test_grant_pulls_prerequisites() {
        let graph = DependencyGraph::default();
        let granted = graph.grant(&PermissionSet::new(), TASKS_ASSIGN);
        assert_eq!(granted, set(&[TASKS_ASSIGN, TASKS_EDIT, TASKS_VIEW]));
    }

    #[test]
    fn test_revoke_cascades_to_dependents() {
        let graph = DependencyGraph::default();
        let current = set(&[TASKS_VIEW, TASKS_CREATE, TASKS_EDIT, DOCS_VIEW]);
        assert_eq!(graph.revoke(&current, TASKS_VIEW), set(&[DOCS_VIEW]));
        assert_eq!(
            graph.revoke(&current, TASKS_CREATE),
            set(&[TASKS_VIEW, TASKS_EDIT, DOCS_VIEW])
        );
    }

    #[test]
    fn test_missing_dependencies_report() {
        let graph = DependencyGraph::default();
        let missing = graph.missing_dependencies(&set(&[PAYMENTS_PROCESS, PAYMENTS_VIEW]));
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[&PAYMENTS_PROCESS], set(&[DOCS_VIEW]));
    }

    #[test]
    fn test_dependency_error_display() {
        let err = DependencyError::Cycle {
            path: vec![PermissionId(1), PermissionId(2), PermissionId(1)],
        };
        assert_eq!(err.to_string(), "permission dependency cycle: 1 -> 2 -> 1");
    }

    fn catalog_subset() -> impl Strategy<Value = PermissionSet> {
        proptest::sample::subsequence(
            CATALOG.iter().map(|info| info.id).collect::<Vec<_>>(),
            0..CATALOG.len(),
        )
        .prop_map(|ids| ids.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_resolve_all_is_superset(current in catalog_subset()) {
            let graph = DependencyGraph::default();
            let resolved = graph.resolve_all(current.iter().copied());
            prop_assert!(resolved.is_superset(&current));
        }

        #[test]
        fn prop_resolve_all_is_idempotent(current in catalog_subset()) {
            let graph = DependencyGraph::default();
            let once = graph.resolve_all(current.iter().copied());
            let twice = graph.resolve_all(once.iter().copied());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_resolved_set_has_no_missing_dependencies(current in catalog_subset()) {
            let graph = DependencyGraph::default();
            let resolved = graph.resolve_all(current.iter().copied());
            prop_assert!(graph.missing_dependencies(&resolved).is_empty());
        }

        #[test]
        fn prop_unmapped_permissions_resolve_empty(code in 10_000u32..20_000) {
            let graph = DependencyGraph::default();
            prop_assert!(graph.resolve_dependencies(PermissionId(code)).is_empty());
        }
    }
}
