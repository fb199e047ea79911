//! Transition validation.
//!
//! The backend enforces the real workflow; this validator answers, from a
//! metadata snapshot, whether the UI should offer a move and what to warn
//! about. The decision runs in stages:
//!
//! 1. an empty transition table allows everything (fail-open)
//! 2. the `(doctype, from, to)` transition must exist
//! 3. the target user must be one of its clients
//! 4. step-kind rules (entry, terminal, billing)
//! 5. parameter soft checks (budgeting, field assessment)
//! 6. same-step moves are reassignments, checked against the roster
//!    instead of stages 4 and 5
//!
//! Stages 2, 3 and 6 stop at the first error.
//!
//! Handing a document to its current owner is rejected before anything
//! else, fail-open included, and carries the `NoWorkflowConfigured` warning
//! when the table is empty. Callers that know the acting user should fill
//! [`Document::owner`] with it when the client left it out.

use aintar_models::{Document, StepId, StepKind, UserId, WorkflowMetadata};
use tracing::{debug, instrument};

use crate::outcome::{RequiredAction, TransitionError, TransitionValidation, TransitionWarning};

/// Parameter name fragments that count as a value to charge.
pub const VALUE_PARAM_KEYS: &[&str] = &["VALOR", "MONTANTE", "PRECO", "TAXA"];

/// Parameter name fragments that count as site measurements.
pub const MEASUREMENT_PARAM_KEYS: &[&str] = &[
    "COMPRIMENTO",
    "EXTENSAO",
    "METROS",
    "MEDICAO",
    "AREA",
    "VOLUME",
    "DIAMETRO",
];

/// Parameter name fragments that count as location data.
pub const LOCATION_PARAM_KEYS: &[&str] = &[
    "MORADA",
    "LOCALIZACAO",
    "COORDENADAS",
    "GPS",
    "LATITUDE",
    "LONGITUDE",
];

/// Decide whether `document` may move from `from` to `to`, assigned to `user`.
#[instrument(
    level = "debug",
    skip_all,
    fields(document_id = %document.id, from = %from, to = %to, user = %user)
)]
pub fn validate_transition(
    document: &Document,
    from: StepId,
    to: StepId,
    user: UserId,
    metadata: &WorkflowMetadata,
) -> TransitionValidation {
    let mut result = TransitionValidation::default();
    let transfer = from == to;

    if transfer && document.owner == Some(user) {
        debug!("Self-transfer rejected");
        result.error(TransitionError::SelfTransfer { user });
        if metadata.transitions.is_empty() {
            result.warn(TransitionWarning::NoWorkflowConfigured);
        }
        return result.finish();
    }

    if metadata.transitions.is_empty() {
        debug!("No transitions configured, allowing move");
        result.is_valid = true;
        result.warn(TransitionWarning::NoWorkflowConfigured);
        return result.finish();
    }

    let matching: Vec<_> = metadata
        .transitions_between(document.doctype, from, to)
        .collect();

    if matching.is_empty() {
        debug!(doctype = %document.doctype, "No matching transition");
        result.error(TransitionError::TransitionNotPermitted {
            from: metadata.step_name(from),
            to: metadata.step_name(to),
        });
        return result.finish();
    }

    if !matching.iter().any(|t| t.client.contains(user)) {
        debug!("Target user not among transition clients");
        result.error(TransitionError::UserNotAuthorized {
            user,
            to: metadata.step_name(to),
        });
        return result.finish();
    }

    if transfer {
        validate_transfer(&mut result, from, user, metadata);
        return result.finish();
    }

    result.is_valid = true;

    check_step_kinds(&mut result, document, from, to, metadata);
    if result.errors.is_empty() {
        check_parameters(&mut result, document, to, metadata);
    }

    result.finish()
}

/// Roster checks for a reassignment within `step`.
fn validate_transfer(
    result: &mut TransitionValidation,
    step: StepId,
    user: UserId,
    metadata: &WorkflowMetadata,
) {
    match metadata.user(user) {
        None => result.error(TransitionError::UnknownUser { user }),
        Some(target) if !target.active => result.error(TransitionError::InactiveUser { user }),
        Some(_) => {
            result.is_valid = true;
            result.warn(TransitionWarning::RemainsInCurrentStep {
                step: metadata.step_name(step),
            });
        }
    }
}

fn check_step_kinds(
    result: &mut TransitionValidation,
    document: &Document,
    from: StepId,
    to: StepId,
    metadata: &WorkflowMetadata,
) {
    if metadata.step_kind(to) == StepKind::Entry && metadata.entry_step() != Some(from) {
        result.error(TransitionError::ReturnToEntry {
            to: metadata.step_name(to),
        });
    }

    if metadata.step_kind(from) == StepKind::Terminal {
        result.error(TransitionError::LeavingTerminal {
            from: metadata.step_name(from),
        });
    }

    if metadata.step_kind(to) == StepKind::Billing && !document.has_param_like(VALUE_PARAM_KEYS) {
        result.warn(TransitionWarning::MissingBillingValue {
            to: metadata.step_name(to),
        });
        result.require(RequiredAction::EnterBillingValue);
    }
}

fn check_parameters(
    result: &mut TransitionValidation,
    document: &Document,
    to: StepId,
    metadata: &WorkflowMetadata,
) {
    match metadata.step_kind(to) {
        StepKind::Budgeting if !document.has_param_like(MEASUREMENT_PARAM_KEYS) => {
            result.warn(TransitionWarning::MissingMeasurements {
                to: metadata.step_name(to),
            });
            result.require(RequiredAction::RecordMeasurements);
        }
        StepKind::FieldAssessment if !document.has_param_like(LOCATION_PARAM_KEYS) => {
            result.warn(TransitionWarning::MissingLocation {
                to: metadata.step_name(to),
            });
            result.require(RequiredAction::RecordLocation);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aintar_models::{
        AllowedClients, DocTypeId, DocumentId, DocumentParam, StepTransition, WorkflowStep,
        WorkflowUser,
    };

    const ENTRY: StepId = StepId(0);
    const ANALYSIS: StepId = StepId(1);
    const BUDGET: StepId = StepId(2);
    const SITE_VISIT: StepId = StepId(3);
    const BILLING: StepId = StepId(4);
    const DONE: StepId = StepId(5);

    const OWNER: UserId = UserId(10);
    const CLERK: UserId = UserId(11);
    const RETIRED: UserId = UserId(12);

    fn step(id: StepId, name: &str) -> WorkflowStep {
        WorkflowStep {
            id,
            name: name.to_string(),
            kind: None,
        }
    }

    fn transition(from: StepId, to: StepId, client: AllowedClients) -> StepTransition {
        StepTransition {
            doctype: DocTypeId(1),
            from_step: from,
            to_step: to,
            client,
        }
    }

    fn metadata() -> WorkflowMetadata {
        let everyone = || AllowedClients::Many(vec![OWNER, CLERK]);
        let mut metadata = WorkflowMetadata {
            steps: vec![
                step(ENTRY, "ENTRADA"),
                step(ANALYSIS, "Em análise"),
                step(BUDGET, "Orçamentação"),
                step(SITE_VISIT, "Avaliação no terreno"),
                step(BILLING, "Cobrança"),
                step(DONE, "Concluído"),
            ],
            users: vec![
                WorkflowUser {
                    id: OWNER,
                    name: "Ana".to_string(),
                    active: true,
                },
                WorkflowUser {
                    id: CLERK,
                    name: "Rui".to_string(),
                    active: true,
                },
                WorkflowUser {
                    id: RETIRED,
                    name: "Zé".to_string(),
                    active: false,
                },
            ],
            transitions: vec![
                transition(ENTRY, ANALYSIS, everyone()),
                transition(ANALYSIS, ENTRY, everyone()),
                transition(ANALYSIS, BUDGET, AllowedClients::One(CLERK)),
                transition(ANALYSIS, SITE_VISIT, everyone()),
                transition(BUDGET, BILLING, everyone()),
                transition(BILLING, DONE, everyone()),
                transition(DONE, ANALYSIS, everyone()),
                transition(
                    ANALYSIS,
                    ANALYSIS,
                    AllowedClients::Many(vec![OWNER, CLERK, RETIRED, UserId(99)]),
                ),
            ],
            ..Default::default()
        };
        metadata.derive_missing_kinds();
        metadata
    }

    fn document(step: StepId, params: Vec<DocumentParam>) -> Document {
        Document {
            id: DocumentId(100),
            regnumber: None,
            doctype: DocTypeId(1),
            current_step: step,
            owner: Some(OWNER),
            params,
        }
    }

    #[test]
    fn test_empty_table_fails_open() {
        let metadata = WorkflowMetadata::default();
        let result = validate_transition(&document(ENTRY, vec![]), ENTRY, DONE, CLERK, &metadata);
        assert!(result.is_valid);
        assert!(result.can_proceed);
        assert_eq!(result.warnings, vec![TransitionWarning::NoWorkflowConfigured]);
    }

    #[test]
    fn test_unknown_transition_is_blocked() {
        let result = validate_transition(
            &document(ENTRY, vec![]),
            ENTRY,
            DONE,
            CLERK,
            &metadata(),
        );
        assert!(!result.is_valid);
        assert!(!result.can_proceed);
        assert!(matches!(
            result.errors.as_slice(),
            [TransitionError::TransitionNotPermitted { .. }]
        ));
    }

    #[test]
    fn test_other_doctype_does_not_match() {
        let mut doc = document(ENTRY, vec![]);
        doc.doctype = DocTypeId(2);
        let result = validate_transition(&doc, ENTRY, ANALYSIS, CLERK, &metadata());
        assert!(!result.can_proceed);
    }

    #[test]
    fn test_unauthorized_user_is_blocked() {
        let doc = document(ANALYSIS, vec![DocumentParam::new("comprimento", "12")]);
        let result = validate_transition(&doc, ANALYSIS, BUDGET, OWNER, &metadata());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![TransitionError::UserNotAuthorized {
                user: OWNER,
                to: "Orçamentação".to_string()
            }]
        );
    }

    #[test]
    fn test_plain_move_proceeds() {
        let result =
            validate_transition(&document(ENTRY, vec![]), ENTRY, ANALYSIS, CLERK, &metadata());
        assert!(result.is_valid);
        assert!(result.can_proceed);
        assert!(result.warnings.is_empty());
        assert!(result.required_actions.is_empty());
    }

    #[test]
    fn test_return_to_entry_is_blocked() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ENTRY,
            CLERK,
            &metadata(),
        );
        assert!(result.is_valid);
        assert!(!result.can_proceed);
        assert!(matches!(
            result.errors.as_slice(),
            [TransitionError::ReturnToEntry { .. }]
        ));
    }

    #[test]
    fn test_leaving_terminal_is_blocked() {
        let result =
            validate_transition(&document(DONE, vec![]), DONE, ANALYSIS, CLERK, &metadata());
        assert!(!result.can_proceed);
        assert!(matches!(
            result.errors.as_slice(),
            [TransitionError::LeavingTerminal { .. }]
        ));
    }

    #[test]
    fn test_billing_without_value_warns() {
        let doc = document(BUDGET, vec![DocumentParam::new("comprimento", "8")]);
        let result = validate_transition(&doc, BUDGET, BILLING, CLERK, &metadata());
        assert!(result.can_proceed);
        assert!(matches!(
            result.warnings.as_slice(),
            [TransitionWarning::MissingBillingValue { .. }]
        ));
        assert_eq!(result.required_actions, vec![RequiredAction::EnterBillingValue]);

        let paid = document(BUDGET, vec![DocumentParam::new("Valor", "310.00")]);
        let result = validate_transition(&paid, BUDGET, BILLING, CLERK, &metadata());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_budgeting_without_measurements_warns() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            BUDGET,
            CLERK,
            &metadata(),
        );
        assert!(result.can_proceed);
        assert!(matches!(
            result.warnings.as_slice(),
            [TransitionWarning::MissingMeasurements { .. }]
        ));
        assert_eq!(result.required_actions, vec![RequiredAction::RecordMeasurements]);
    }

    #[test]
    fn test_field_assessment_needs_location() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            SITE_VISIT,
            CLERK,
            &metadata(),
        );
        assert!(result.can_proceed);
        assert_eq!(result.required_actions, vec![RequiredAction::RecordLocation]);

        let located = document(ANALYSIS, vec![DocumentParam::new("Morada", "Rua Direita 5")]);
        let result = validate_transition(&located, ANALYSIS, SITE_VISIT, CLERK, &metadata());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_self_transfer_is_blocked() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            OWNER,
            &metadata(),
        );
        assert!(!result.can_proceed);
        assert_eq!(result.errors, vec![TransitionError::SelfTransfer { user: OWNER }]);
    }

    #[test]
    fn test_self_transfer_is_blocked_without_workflow() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            OWNER,
            &WorkflowMetadata::default(),
        );
        assert!(!result.can_proceed);
        assert_eq!(result.errors, vec![TransitionError::SelfTransfer { user: OWNER }]);
        assert_eq!(result.warnings, vec![TransitionWarning::NoWorkflowConfigured]);
    }

    #[test]
    fn test_transfer_to_colleague_fails_open_without_workflow() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            CLERK,
            &WorkflowMetadata::default(),
        );
        assert!(result.can_proceed);
        assert_eq!(result.warnings, vec![TransitionWarning::NoWorkflowConfigured]);
    }

    #[test]
    fn test_transfer_without_owner_is_not_a_self_transfer() {
        let mut doc = document(ANALYSIS, vec![]);
        doc.owner = None;
        let result = validate_transition(&doc, ANALYSIS, ANALYSIS, OWNER, &metadata());
        assert!(result.can_proceed);

        doc.owner = Some(OWNER);
        let result = validate_transition(&doc, ANALYSIS, ANALYSIS, OWNER, &metadata());
        assert!(!result.can_proceed);
    }

    #[test]
    fn test_transfer_needs_a_configured_same_step_transition() {
        let result = validate_transition(
            &document(BUDGET, vec![]),
            BUDGET,
            BUDGET,
            CLERK,
            &metadata(),
        );
        assert!(!result.is_valid);
        assert!(matches!(
            result.errors.as_slice(),
            [TransitionError::TransitionNotPermitted { .. }]
        ));
    }

    #[test]
    fn test_transfer_target_must_be_a_client() {
        let mut metadata = metadata();
        metadata.transitions.retain(|t| t.from_step != t.to_step);
        metadata
            .transitions
            .push(transition(ANALYSIS, ANALYSIS, AllowedClients::One(OWNER)));

        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            CLERK,
            &metadata,
        );
        assert!(matches!(
            result.errors.as_slice(),
            [TransitionError::UserNotAuthorized { .. }]
        ));
    }

    #[test]
    fn test_transfer_to_unknown_or_inactive_user() {
        let doc = document(ANALYSIS, vec![]);
        let unknown = validate_transition(&doc, ANALYSIS, ANALYSIS, UserId(99), &metadata());
        assert_eq!(
            unknown.errors,
            vec![TransitionError::UnknownUser { user: UserId(99) }]
        );

        let inactive = validate_transition(&doc, ANALYSIS, ANALYSIS, RETIRED, &metadata());
        assert_eq!(
            inactive.errors,
            vec![TransitionError::InactiveUser { user: RETIRED }]
        );
        assert!(!inactive.can_proceed);
    }

    #[test]
    fn test_transfer_to_colleague_proceeds_with_warning() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            CLERK,
            &metadata(),
        );
        assert!(result.is_valid);
        assert!(result.can_proceed);
        assert!(matches!(
            result.warnings.as_slice(),
            [TransitionWarning::RemainsInCurrentStep { .. }]
        ));
    }

    #[test]
    fn test_report_serializes_codes() {
        let result = validate_transition(
            &document(ANALYSIS, vec![]),
            ANALYSIS,
            ANALYSIS,
            OWNER,
            &metadata(),
        );
        let json = serde_json::to_value(result.report()).unwrap();
        assert_eq!(json["canProceed"], false);
        assert_eq!(json["errors"][0]["code"], "self_transfer");
    }
}
