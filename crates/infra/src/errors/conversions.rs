//! Conversions from external infrastructure errors into domain errors.

use eda_domain::EdaError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EdaError);

impl From<InfraError> for EdaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EdaError> for InfraError {
    fn from(value: EdaError) -> Self {
        InfraError(value)
    }
}

trait IntoEdaError {
    fn into_eda(self) -> EdaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EdaError */
/* -------------------------------------------------------------------------- */

impl IntoEdaError for HttpError {
    fn into_eda(self) -> EdaError {
        if self.is_timeout() {
            return EdaError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return EdaError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return EdaError::Internal(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return EdaError::Protocol(format!("failed to decode response body: {self}"));
        }

        if let Some(status) = self.status() {
            return EdaError::Commit {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or("unknown status").to_string(),
            };
        }

        EdaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_eda())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → EdaError */
/* -------------------------------------------------------------------------- */

impl IntoEdaError for JsonError {
    fn into_eda(self) -> EdaError {
        EdaError::Protocol(format!("malformed JSON response: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_eda())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
