//! The document (request) a workflow transition applies to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::{DocTypeId, DocumentId, StepId, UserId};
use crate::text::fold_label;

/// Free-form name/value parameter attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentParam {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl DocumentParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A value that is present and not blank.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

/// Snapshot of a document as held by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regnumber: Option<String>,
    pub doctype: DocTypeId,
    pub current_step: StepId,
    /// Staff member currently holding the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    #[serde(default)]
    pub params: Vec<DocumentParam>,
}

impl Document {
    /// Whether a parameter whose name contains any of `keys` carries a value.
    ///
    /// Names are compared case- and accent-insensitively; `keys` must already
    /// be folded (uppercase, no diacritics).
    pub fn has_param_like(&self, keys: &[&str]) -> bool {
        self.params.iter().filter(|p| p.has_value()).any(|p| {
            let name = fold_label(&p.name);
            keys.iter().any(|key| name.contains(key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(params: Vec<DocumentParam>) -> Document {
        Document {
            id: DocumentId(1),
            regnumber: Some("2024.S.000123".to_string()),
            doctype: DocTypeId(1),
            current_step: StepId(0),
            owner: Some(UserId(10)),
            params,
        }
    }

    #[test]
    fn test_has_param_like_matches_folded_names() {
        let doc = document(vec![DocumentParam::new("Valor a cobrar", "125.40")]);
        assert!(doc.has_param_like(&["VALOR"]));
        assert!(!doc.has_param_like(&["MORADA"]));
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let doc = document(vec![
            DocumentParam::new("valor", "   "),
            DocumentParam {
                name: "montante".to_string(),
                value: None,
            },
        ]);
        assert!(!doc.has_param_like(&["VALOR", "MONTANTE"]));
    }

    #[test]
    fn test_document_deserializes_with_defaults() {
        let doc: Document =
            serde_json::from_str(r#"{"id": 5, "doctype": 2, "current_step": 3}"#).unwrap();
        assert_eq!(doc.owner, None);
        assert!(doc.params.is_empty());
    }
}
