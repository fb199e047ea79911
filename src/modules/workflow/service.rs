use aintar_cache::{CacheManager, keys};
use aintar_models::{DocTypeId, StepId, UserId, WorkflowMetadata};
use aintar_workflow::{AvailableTransition, ValidationReport, available_transitions};
use tracing::info;

use crate::state::WorkflowSnapshot;

use super::model::ValidateTransitionDto;

/// Validate a move requested by `actor`.
///
/// A document sent without `owner` is taken to be held by `actor`, so a
/// transfer to oneself is caught either way.
pub fn validate(
    metadata: &WorkflowMetadata,
    mut dto: ValidateTransitionDto,
    actor: UserId,
) -> ValidationReport {
    dto.document.owner.get_or_insert(actor);
    let from = dto.from_step();
    let validation =
        aintar_workflow::validate_transition(&dto.document, from, dto.to_step, dto.user_id, metadata);

    info!(
        document_id = %dto.document.id,
        from = %from,
        to = %dto.to_step,
        target_user = %dto.user_id,
        can_proceed = validation.can_proceed,
        errors = validation.errors.len(),
        "Transition validated"
    );

    validation.report()
}

/// Destinations from `from`, cached per snapshot generation.
pub fn transitions(
    cache: &CacheManager,
    snapshot: &WorkflowSnapshot,
    doctype: DocTypeId,
    from: StepId,
) -> Vec<AvailableTransition> {
    let key = keys::metadata::transitions(snapshot.generation, doctype, from);
    cache.get_or_insert_with(&key, || {
        available_transitions(doctype, from, &snapshot.metadata)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aintar_models::{
        AllowedClients, Document, DocumentId, StepKind, StepTransition, UserId, WorkflowStep,
        WorkflowUser,
    };
    use std::time::Duration;

    fn metadata() -> WorkflowMetadata {
        WorkflowMetadata {
            steps: vec![
                WorkflowStep {
                    id: StepId(0),
                    name: "ENTRADA".to_string(),
                    kind: Some(StepKind::Entry),
                },
                WorkflowStep {
                    id: StepId(1),
                    name: "Em análise".to_string(),
                    kind: Some(StepKind::Standard),
                },
            ],
            users: vec![WorkflowUser {
                id: UserId(10),
                name: "Ana".to_string(),
                active: true,
            }],
            transitions: vec![StepTransition {
                doctype: DocTypeId(1),
                from_step: StepId(0),
                to_step: StepId(1),
                client: AllowedClients::One(UserId(10)),
            }],
            ..Default::default()
        }
    }

    fn dto(to_step: StepId) -> ValidateTransitionDto {
        ValidateTransitionDto {
            document: Document {
                id: DocumentId(1),
                regnumber: None,
                doctype: DocTypeId(1),
                current_step: StepId(0),
                owner: None,
                params: vec![],
            },
            from_step: None,
            to_step,
            user_id: UserId(10),
        }
    }

    #[test]
    fn test_from_step_defaults_to_current_step() {
        let report = validate(&metadata(), dto(StepId(1)), UserId(10));
        assert!(report.can_proceed);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_owner_defaults_to_actor() {
        let mut metadata = metadata();
        metadata.transitions.push(StepTransition {
            doctype: DocTypeId(1),
            from_step: StepId(0),
            to_step: StepId(0),
            client: AllowedClients::One(UserId(10)),
        });

        let report = validate(&metadata, dto(StepId(0)), UserId(10));
        assert!(!report.can_proceed);
        assert_eq!(report.errors[0].code, "self_transfer");
    }

    fn snapshot(metadata: WorkflowMetadata, generation: u64) -> WorkflowSnapshot {
        let mut snapshot = WorkflowSnapshot::new(metadata).unwrap();
        snapshot.generation = generation;
        snapshot
    }

    #[test]
    fn test_transitions_are_cached_per_generation() {
        let cache = CacheManager::new(Duration::from_secs(60));
        let first = transitions(&cache, &snapshot(metadata(), 0), DocTypeId(1), StepId(0));
        assert_eq!(first.len(), 1);

        let cached = transitions(
            &cache,
            &snapshot(WorkflowMetadata::default(), 0),
            DocTypeId(1),
            StepId(0),
        );
        assert_eq!(cached, first);

        let fresh = transitions(
            &cache,
            &snapshot(WorkflowMetadata::default(), 1),
            DocTypeId(1),
            StepId(0),
        );
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_late_write_from_replaced_snapshot_is_not_read() {
        let cache = CacheManager::new(Duration::from_secs(60));
        let old = snapshot(metadata(), 0);
        let new = snapshot(WorkflowMetadata::default(), 1);

        // Reload invalidates, then a request still holding the old snapshot
        // fills the cache.
        cache.invalidate_prefix(&keys::metadata::invalidation_prefix());
        assert_eq!(transitions(&cache, &old, DocTypeId(1), StepId(0)).len(), 1);

        assert!(transitions(&cache, &new, DocTypeId(1), StepId(0)).is_empty());
    }
}
