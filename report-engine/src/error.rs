use record_store::StoreError;
use thiserror::Error;

use crate::providers::ProviderKind;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing required input: {field}")]
    MissingInput { field: &'static str },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Network error calling {provider}: {message}")]
    Network { provider: ProviderKind, message: String },

    #[error("{provider} returned HTTP {status}: {body}")]
    ProviderStatus {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: ProviderKind, message: String },

    #[error("Template has unresolved tokens: {}", .0.join(", "))]
    UnresolvedTokens(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// Short machine-readable category used in logs and in fallback reports
    pub fn failure_kind(&self) -> &'static str {
        match self {
            ReportError::MissingInput { .. } => "missing_input",
            ReportError::UnsupportedProvider(_) => "unsupported_provider",
            ReportError::Network { .. } => "network",
            ReportError::ProviderStatus { .. } => "http_status",
            ReportError::MalformedResponse { .. } => "malformed_response",
            ReportError::UnresolvedTokens(_) => "unresolved_tokens",
            ReportError::Config(_) => "config",
            ReportError::Store(_) => "store",
        }
    }

    /// Whether the error came from talking to a provider
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            ReportError::Network { .. }
                | ReportError::ProviderStatus { .. }
                | ReportError::MalformedResponse { .. }
        )
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
