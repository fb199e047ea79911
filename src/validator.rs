use aintar_core::AppError;
use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// `field: message` pairs, sorted by field for stable output.
fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value ({})", error.code),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Turn serde's "missing field `x` at line ..." into "x is required".
fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            anyhow!("Expected 'Content-Type: application/json'"),
        ),
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            match missing_field(&text) {
                Some(field) => AppError::bad_request(anyhow!("{field} is required")),
                None => AppError::bad_request(anyhow!("Invalid field type in request")),
            }
        }
        JsonRejection::JsonSyntaxError(_) => {
            AppError::bad_request(anyhow!("Request body is not valid JSON"))
        }
        other => AppError::new(other.status(), anyhow!("{}", other.body_text())),
    }
}

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Malformed bodies are `400`, rule violations `422`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_extraction() {
        assert_eq!(
            missing_field("Failed to deserialize: missing field `to_step` at line 1 column 2"),
            Some("to_step")
        );
        assert_eq!(missing_field("invalid type: string"), None);
    }
}
