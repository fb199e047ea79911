use aintar_models::{DocTypeId, StepId, StepKind, UserId, WorkflowMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A destination offered in the "move to" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailableTransition {
    pub to_step: StepId,
    pub name: String,
    pub kind: StepKind,
    /// Users who may receive the document there, merged across duplicate
    /// transition rows.
    pub clients: Vec<UserId>,
}

/// Destinations configured from `from` for `doctype`, ordered by step id.
pub fn available_transitions(
    doctype: DocTypeId,
    from: StepId,
    metadata: &WorkflowMetadata,
) -> Vec<AvailableTransition> {
    let mut by_step: BTreeMap<StepId, Vec<UserId>> = BTreeMap::new();

    for transition in metadata.transitions_from(doctype, from) {
        let clients = by_step.entry(transition.to_step).or_default();
        for user in transition.client.to_vec() {
            if !clients.contains(&user) {
                clients.push(user);
            }
        }
    }

    by_step
        .into_iter()
        .map(|(to_step, clients)| AvailableTransition {
            to_step,
            name: metadata.step_name(to_step),
            kind: metadata.step_kind(to_step),
            clients,
        })
        .collect()
}
