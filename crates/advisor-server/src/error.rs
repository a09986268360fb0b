//! HTTP Error Responses

use agent_core::AgentError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::ToolNotFound(_) | Self::Agent(AgentError::ToolNotFound(_)) => {
                (StatusCode::NOT_FOUND, "TOOL_NOT_FOUND")
            }
            Self::Agent(AgentError::ToolValidation(_) | AgentError::MissingValue(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS")
            }
            Self::Agent(AgentError::Provider(_) | AgentError::ProviderUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_UNAVAILABLE")
            }
            Self::Agent(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AGENT_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let error = match &self {
            Self::Agent(e) => {
                if status.is_server_error() {
                    tracing::error!(error = %e, "Agent error");
                }
                e.user_message()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error,
                code: code.into(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ServerError::Agent(AgentError::ProviderUnavailable("connection refused".into()));
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let err = ServerError::Agent(AgentError::ToolValidation("Missing required parameter: query".into()));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS"));

        let err = ServerError::ToolNotFound("get_weather".into());
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
    }
}
