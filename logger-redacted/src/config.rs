// Logger configuration
use serde::{Deserialize, Serialize};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for local development
    Pretty,
    /// Structured JSON output for production
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Redact PHI and credentials from every emitted line
    pub redaction_enabled: bool,
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,
    pub format: LogFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            log_level: "alphascript_server=info,report_engine=info,recording_service=info,record_store=info,tower_http=info,reqwest=warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggerConfig {
    /// Raise the default filter to debug for the engine crates
    pub fn verbose(mut self) -> Self {
        self.log_level = self.log_level.replace("=info", "=debug");
        self
    }
}
