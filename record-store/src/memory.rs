//! In-memory record store
//!
//! Rows are kept in insertion order, so listing newest-first is a reverse
//! scan. Ownership is checked on every access.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    NewPatient, NewRecording, NewReport, NewTemplate, Patient, Recording, RecordingStatus,
    RecordingWithPatient, Report, ReportStatus, Template, UserId,
};
use crate::store::RecordStore;

#[derive(Default)]
struct Tables {
    tokens: HashMap<String, UserId>,
    patients: Vec<Patient>,
    recordings: Vec<Recording>,
    reports: Vec<Report>,
    templates: Vec<Template>,
}

impl Tables {
    fn patient(&self, user: UserId, id: Uuid) -> StoreResult<&Patient> {
        self.patients
            .iter()
            .find(|p| p.id == id && p.user_id == user)
            .ok_or_else(|| StoreError::not_found("Patient", id))
    }

    fn with_patient(&self, recording: &Recording) -> StoreResult<RecordingWithPatient> {
        let patient = self.patient(recording.user_id, recording.patient_id)?;
        Ok(RecordingWithPatient {
            recording: recording.clone(),
            patient: patient.clone(),
        })
    }
}

/// Record store backed by process memory
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that accepts the given bearer tokens
    pub fn with_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (String, UserId)>,
    {
        let tables = Tables {
            tokens: tokens.into_iter().collect(),
            ..Default::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn require_non_empty(value: &str, field: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn authenticate(&self, token: &str) -> StoreResult<UserId> {
        self.tables
            .read()
            .await
            .tokens
            .get(token)
            .copied()
            .ok_or(StoreError::Unauthorized)
    }

    async fn create_patient(&self, user: UserId, patient: NewPatient) -> StoreResult<Patient> {
        require_non_empty(&patient.name, "name")?;

        let row = Patient {
            id: Uuid::new_v4(),
            user_id: user,
            name: patient.name.trim().to_string(),
            date_of_birth: patient.date_of_birth,
            created_at: Utc::now(),
        };
        self.tables.write().await.patients.push(row.clone());
        debug!(patient_id = %row.id, "Patient created");
        Ok(row)
    }

    async fn get_patient(&self, user: UserId, id: Uuid) -> StoreResult<Patient> {
        self.tables.read().await.patient(user, id).cloned()
    }

    async fn list_patients(&self, user: UserId) -> StoreResult<Vec<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables
            .patients
            .iter()
            .rev()
            .filter(|p| p.user_id == user)
            .cloned()
            .collect())
    }

    async fn create_recording(&self, user: UserId, recording: NewRecording) -> StoreResult<Recording> {
        let mut tables = self.tables.write().await;
        tables.patient(user, recording.patient_id)?;

        let row = Recording {
            id: Uuid::new_v4(),
            user_id: user,
            patient_id: recording.patient_id,
            title: recording.title,
            transcription: String::new(),
            status: RecordingStatus::Recording,
            created_at: Utc::now(),
        };
        tables.recordings.push(row.clone());
        debug!(recording_id = %row.id, "Recording created");
        Ok(row)
    }

    async fn get_recording(&self, user: UserId, id: Uuid) -> StoreResult<RecordingWithPatient> {
        let tables = self.tables.read().await;
        let recording = tables
            .recordings
            .iter()
            .find(|r| r.id == id && r.user_id == user)
            .ok_or_else(|| StoreError::not_found("Recording", id))?;
        tables.with_patient(recording)
    }

    async fn list_recordings(&self, user: UserId) -> StoreResult<Vec<RecordingWithPatient>> {
        let tables = self.tables.read().await;
        tables
            .recordings
            .iter()
            .rev()
            .filter(|r| r.user_id == user)
            .map(|r| tables.with_patient(r))
            .collect()
    }

    async fn complete_recording(
        &self,
        user: UserId,
        id: Uuid,
        transcription: String,
    ) -> StoreResult<Recording> {
        let mut tables = self.tables.write().await;
        let recording = tables
            .recordings
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user)
            .ok_or_else(|| StoreError::not_found("Recording", id))?;

        recording.transcription = transcription;
        recording.status = RecordingStatus::Completed;
        Ok(recording.clone())
    }

    async fn insert_report(&self, user: UserId, report: NewReport) -> StoreResult<Report> {
        let mut tables = self.tables.write().await;
        let owns_recording = tables
            .recordings
            .iter()
            .any(|r| r.id == report.recording_id && r.user_id == user);
        if !owns_recording {
            return Err(StoreError::not_found("Recording", report.recording_id));
        }

        let row = Report {
            id: Uuid::new_v4(),
            user_id: user,
            recording_id: report.recording_id,
            patient_id: report.patient_id,
            report_type: report.report_type,
            title: report.title,
            content: report.content,
            status: report.status,
            generation_source: report.generation_source,
            created_at: Utc::now(),
        };
        tables.reports.push(row.clone());
        debug!(report_id = %row.id, report_type = %row.report_type, "Report stored");
        Ok(row)
    }

    async fn get_report(&self, user: UserId, id: Uuid) -> StoreResult<Report> {
        self.tables
            .read()
            .await
            .reports
            .iter()
            .find(|r| r.id == id && r.user_id == user)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Report", id))
    }

    async fn list_reports(&self, user: UserId) -> StoreResult<Vec<Report>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reports
            .iter()
            .rev()
            .filter(|r| r.user_id == user)
            .cloned()
            .collect())
    }

    async fn update_report_status(
        &self,
        user: UserId,
        id: Uuid,
        status: ReportStatus,
    ) -> StoreResult<Report> {
        let mut tables = self.tables.write().await;
        let report = tables
            .reports
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user)
            .ok_or_else(|| StoreError::not_found("Report", id))?;

        report.status = status;
        Ok(report.clone())
    }

    async fn create_template(&self, user: UserId, template: NewTemplate) -> StoreResult<Template> {
        require_non_empty(&template.name, "name")?;
        require_non_empty(&template.content, "content")?;

        let row = Template {
            id: Uuid::new_v4(),
            user_id: user,
            name: template.name,
            template_type: template.template_type,
            content: template.content,
            created_at: Utc::now(),
        };
        self.tables.write().await.templates.push(row.clone());
        Ok(row)
    }

    async fn get_template(&self, user: UserId, id: Uuid) -> StoreResult<Template> {
        self.tables
            .read()
            .await
            .templates
            .iter()
            .find(|t| t.id == id && t.user_id == user)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Template", id))
    }

    async fn list_templates(&self, user: UserId) -> StoreResult<Vec<Template>> {
        let tables = self.tables.read().await;
        Ok(tables
            .templates
            .iter()
            .rev()
            .filter(|t| t.user_id == user)
            .cloned()
            .collect())
    }

    async fn delete_template(&self, user: UserId, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.templates.len();
        tables.templates.retain(|t| !(t.id == id && t.user_id == user));

        if tables.templates.len() == before {
            return Err(StoreError::not_found("Template", id));
        }
        Ok(())
    }
}
