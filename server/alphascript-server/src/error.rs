use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use record_store::StoreError;
use recording_service::RecordingError;
use report_engine::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    pub error_type: String,
    /// Stable code from `error_common::codes`
    pub error_code: String,
    pub message: String,
    /// Field-specific validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<HashMap<String, Vec<String>>>,
    /// Template tokens that could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved_tokens: Option<Vec<String>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        code: &'static str,
        message: String,
        field_errors: Option<HashMap<String, Vec<String>>>,
    },

    #[error("Authentication error: {message}")]
    Authentication { code: &'static str, message: String },

    #[error("{resource_type} not found")]
    NotFound {
        code: &'static str,
        resource_type: String,
    },

    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    #[error("Unresolved template tokens: {}", .tokens.join(", "))]
    UnresolvedTokens { tokens: Vec<String> },

    #[error("Internal server error: {message}")]
    Internal { code: &'static str, message: String },
}

impl ApiError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    /// Validation error for a single field
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), vec![message.clone()]);
        Self::Validation {
            code: codes::validation::INVALID_FORMAT,
            message: format!("{}: {}", field, message),
            field_errors: Some(field_errors),
        }
    }

    pub fn authentication(code: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: codes::system::INTERNAL,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::UnresolvedTokens { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::UnresolvedTokens { .. } => "unprocessable_entity",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. }
            | ApiError::Authentication { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Internal { code, .. } => *code,
            ApiError::UnresolvedTokens { .. } => codes::template::UNRESOLVED_TOKENS,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => ApiError::NotFound {
                code: codes::store::NOT_FOUND,
                resource_type: entity.to_string(),
            },
            StoreError::Unauthorized => ApiError::authentication(
                codes::authentication::INVALID_CREDENTIALS,
                "Invalid or expired access token",
            ),
            StoreError::Validation(message) => {
                ApiError::validation(codes::store::CONSTRAINT_VIOLATION, message)
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingInput { field } => {
                let mut field_errors = HashMap::new();
                field_errors.insert(field.to_string(), vec!["is required".to_string()]);
                ApiError::Validation {
                    code: codes::validation::MISSING_REQUIRED_FIELD,
                    message: format!("Missing required field: {}", field),
                    field_errors: Some(field_errors),
                }
            }
            ReportError::UnsupportedProvider(name) => ApiError::validation(
                codes::provider::UNSUPPORTED_PROVIDER,
                format!("Unsupported provider: {}", name),
            ),
            ReportError::UnresolvedTokens(tokens) => ApiError::UnresolvedTokens { tokens },
            ReportError::Store(store_err) => store_err.into(),
            ReportError::Network { .. }
            | ReportError::ProviderStatus { .. }
            | ReportError::MalformedResponse { .. } => ApiError::Internal {
                code: codes::provider::PROVIDER_FAILURE,
                message: "Report provider failed".to_string(),
            },
            ReportError::Config(message) => ApiError::internal(message),
        }
    }
}

impl From<RecordingError> for ApiError {
    fn from(err: RecordingError) -> Self {
        match err {
            RecordingError::InvalidTransition { .. } => ApiError::Conflict {
                code: codes::recording::INVALID_TRANSITION,
                message: err.to_string(),
            },
            RecordingError::UnknownEvent(_) => {
                ApiError::validation(codes::validation::INVALID_FORMAT, err.to_string())
            }
            RecordingError::SessionNotFound(_) => ApiError::NotFound {
                code: codes::recording::SESSION_NOT_FOUND,
                resource_type: "Recording session".to_string(),
            },
            RecordingError::Transcription(message) => ApiError::Internal {
                code: codes::recording::TRANSCRIPTION_FAILED,
                message,
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors: HashMap<String, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        ApiError::Validation {
            code: codes::validation::INVALID_INPUT,
            message: "Request validation failed".to_string(),
            field_errors: Some(field_errors),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(codes::validation::INVALID_FORMAT, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = %self.error_code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = %self.error_code(),
                status_code = %status_code.as_u16(),
                "Request rejected"
            );
        }

        let field_errors = match &self {
            ApiError::Validation { field_errors, .. } => field_errors.clone(),
            _ => None,
        };
        let unresolved_tokens = match &self {
            ApiError::UnresolvedTokens { tokens } => Some(tokens.clone()),
            _ => None,
        };

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            error_code: self.error_code().to_string(),
            message: self.to_string(),
            field_errors,
            unresolved_tokens,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
