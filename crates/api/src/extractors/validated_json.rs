//! JSON body extractors that report failures through [`AppError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use playhub_core::error::CoreError;
use playhub_core::validation::FieldErrors;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Prefix axum puts in front of serde's message for a `JsonDataError`.
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Deserializes a JSON body and validates it with [`Validate`].
///
/// Malformed JSON becomes a 400 `BAD_REQUEST`; rule violations and fields of
/// the wrong type become a 400 `VALIDATION_ERROR` with per-field messages.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Deserializes a JSON body without running validation rules.
///
/// For handlers that must check existence or ownership before field rules;
/// they call [`validate_input`] themselves. Rejections match [`ValidatedJson`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        validate_input(&value)?;
        Ok(Self(value))
    }
}

/// Run `validator` rules on an already-deserialized value.
///
/// Handlers that must check existence or ownership before field rules call
/// this directly instead of using [`ValidatedJson`].
pub fn validate_input<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::Core(CoreError::InvalidFields(to_field_errors(&errors))))
}

fn to_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures {
            let message = failure
                .message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("The {field} field is invalid."));
            fields.add(field.to_string(), message);
        }
    }
    fields
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();
    tracing::debug!(error = %detail, "Rejected JSON body");
    let message = match rejection {
        JsonRejection::JsonDataError(_) => {
            if let Some(field) = data_error_field(&detail) {
                let mut fields = FieldErrors::new();
                fields.add(field, format!("The {field} field has an invalid type."));
                return AppError::Core(CoreError::InvalidFields(fields));
            }
            "Invalid JSON: wrong types for one or more fields"
        }
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON: syntax error",
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        _ => "Failed to read request body",
    };
    AppError::BadRequest(message.to_string())
}

/// Top-level field named by a deserialization error, e.g. `score` from
/// `"...target type: score: invalid type: string \"abc\", expected f64"`.
///
/// `None` when the error is about the body as a whole.
fn data_error_field(detail: &str) -> Option<&str> {
    let (path, _) = detail.strip_prefix(DATA_ERROR_PREFIX)?.split_once(": ")?;
    let field = path.split(['.', '[']).next()?;
    let is_identifier = !field.is_empty()
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_identifier.then_some(field)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(
            required(message = "The name field is required."),
            length(min = 3, message = "The name must be at least 3 characters.")
        )]
        name: Option<String>,
    }

    #[test]
    fn valid_input_passes() {
        let sample = Sample {
            name: Some("abcd".into()),
        };
        assert!(validate_input(&sample).is_ok());
    }

    #[test]
    fn messages_are_collected_per_field() {
        let missing = Sample { name: None };
        let Err(AppError::Core(CoreError::InvalidFields(fields))) = validate_input(&missing) else {
            panic!("expected field errors");
        };
        assert_eq!(
            fields.get("name"),
            Some(&["The name field is required.".to_string()][..])
        );

        let short = Sample {
            name: Some("ab".into()),
        };
        let Err(AppError::Core(CoreError::InvalidFields(fields))) = validate_input(&short) else {
            panic!("expected field errors");
        };
        assert!(fields.get("name").unwrap()[0].contains("at least 3"));
    }

    #[test]
    fn data_error_names_the_offending_field() {
        let detail = format!(
            "{DATA_ERROR_PREFIX}score: invalid type: string \"abc\", expected f64 at line 1 column 15"
        );
        assert_eq!(data_error_field(&detail), Some("score"));

        let nested = format!("{DATA_ERROR_PREFIX}title.inner: invalid type: integer `5`");
        assert_eq!(data_error_field(&nested), Some("title"));
    }

    #[test]
    fn data_error_about_the_whole_body_has_no_field() {
        let detail = format!("{DATA_ERROR_PREFIX}invalid type: sequence, expected struct Sample");
        assert_eq!(data_error_field(&detail), None);
        assert_eq!(data_error_field("something else entirely"), None);
    }
}
