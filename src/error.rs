//! Typed errors and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Failures raised by a repository backing store.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

/// ApiError
///
/// Every failure a handler or the role gate can produce.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller is anonymous or lacks the route's minimum role.
    #[error("Access Denied")]
    Forbidden,
    /// A fetch-by-id found no matching record.
    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: &'static str, id: String },
    /// A request parameter was missing or could not be coerced to its field type.
    #[error("{message}")]
    InvalidParameter { name: String, message: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: format!("Required parameter '{name}' is not present"),
        }
    }

    pub fn invalid_parameter(name: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: format!("Parameter '{name}' has invalid value '{value}': expected {expected}"),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `type` discriminator carried in the JSON error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Forbidden => "AccessDeniedException",
            Self::EntityNotFound { .. } => "EntityNotFoundException",
            Self::InvalidParameter { .. } => "InvalidParameterException",
            Self::Repository(_) => "InternalServerError",
        }
    }
}

/// ErrorBody
///
/// Shared shape of every error response: `{"type": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Storage details stay in the logs.
            Self::Repository(e) => {
                tracing::error!("repository failure: {:?}", e);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error_type: self.kind().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
