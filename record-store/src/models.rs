// Record models
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub type UserId = Uuid;

/// Category of generated document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Consultation,
    Soap,
    Followup,
    Discharge,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown report type: {0}")]
pub struct UnknownReportType(pub String);

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Consultation,
        ReportType::Soap,
        ReportType::Followup,
        ReportType::Discharge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Consultation => "consultation",
            ReportType::Soap => "soap",
            ReportType::Followup => "followup",
            ReportType::Discharge => "discharge",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Consultation => "Consultation Note",
            ReportType::Soap => "SOAP Note",
            ReportType::Followup => "Follow-up Email",
            ReportType::Discharge => "Discharge Summary",
        }
    }

    /// Lenient parse: anything outside the enum generates a consultation note.
    pub fn resolve(value: &str) -> Self {
        value.parse().unwrap_or(ReportType::Consultation)
    }
}

impl FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consultation" => Ok(ReportType::Consultation),
            "soap" => Ok(ReportType::Soap),
            "followup" => Ok(ReportType::Followup),
            "discharge" => Ok(ReportType::Discharge),
            other => Err(UnknownReportType(other.to_string())),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingStatus {
    Recording,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: Uuid,
    pub user_id: UserId,
    pub patient_id: Uuid,
    pub title: String,
    /// Empty until the recording has been transcribed
    pub transcription: String,
    pub status: RecordingStatus,
    pub created_at: DateTime<Utc>,
}

/// Recording joined with the patient it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingWithPatient {
    #[serde(flatten)]
    pub recording: Recording,
    pub patient: Patient,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRecording {
    pub patient_id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Completed,
    Sent,
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(ReportStatus::Draft),
            "completed" => Ok(ReportStatus::Completed),
            "sent" => Ok(ReportStatus::Sent),
            other => Err(format!("Unknown report status: {}", other)),
        }
    }
}

/// Where the content of a report came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationSource {
    /// Text returned by a language-model provider
    Provider { provider: String },
    /// Local fallback text produced after the provider call failed
    Fallback { provider: String, failure: String },
}

impl GenerationSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationSource::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: UserId,
    pub recording_id: Uuid,
    pub patient_id: Uuid,
    pub report_type: ReportType,
    pub title: String,
    pub content: String,
    pub status: ReportStatus,
    pub generation_source: GenerationSource,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub recording_id: Uuid,
    pub patient_id: Uuid,
    pub report_type: ReportType,
    pub title: String,
    pub content: String,
    pub status: ReportStatus,
    pub generation_source: GenerationSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub template_type: ReportType,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub template_type: ReportType,
    pub content: String,
}
