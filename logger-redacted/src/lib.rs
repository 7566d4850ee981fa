//! Logging with automatic PHI and credential redaction
//!
//! Clinical transcripts, patient identifiers and caller-supplied language-model
//! API keys pass through the report pipeline. Every line written by the
//! tracing subscriber installed here goes through [`PiiRedactor`] first, and
//! the same redactor is available to code that needs to scrub a provider error
//! body before attaching it to a log event.
//!
//! # Redacted Data Types
//!
//! - **Vendor API keys**: `sk-…`, `sk-ant-…`, `gsk_…`
//! - **Bearer tokens**: `Authorization: Bearer …`
//! - **Email addresses**, **phone numbers**, **SSNs**
//! - **Custom patterns** supplied through [`RedactionConfig`]
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, LoggerConfig};
//!
//! init_tracing(&LoggerConfig::default()).expect("subscriber installed once");
//! tracing::info!("provider rejected key sk-proj-0123456789abcdefgh");
//! // Output: "provider rejected key KEY[...]"
//! ```

pub mod redactor;
pub mod writer;
pub mod config;

pub use redactor::*;
pub use writer::*;
pub use config::*;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_tracing(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| LoggerError::InvalidFilter(e.to_string()))?,
    };

    let redactor = config
        .redaction_enabled
        .then(|| PiiRedactor::new(RedactionConfig::default()));
    let make_writer = RedactingMakeWriter::new(redactor);

    match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(make_writer),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(make_writer),
            )
            .try_init(),
    }
    .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))
}
