use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{
    NewPatient, NewRecording, NewReport, NewTemplate, Patient, Recording, RecordingWithPatient,
    Report, ReportStatus, Template, UserId,
};

/// Hosted record store consumed by the API handlers and the report orchestrator
///
/// Implementations must scope every read and write to `user`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Resolve a bearer token to the user it belongs to
    async fn authenticate(&self, token: &str) -> StoreResult<UserId>;

    async fn create_patient(&self, user: UserId, patient: NewPatient) -> StoreResult<Patient>;
    async fn get_patient(&self, user: UserId, id: Uuid) -> StoreResult<Patient>;
    async fn list_patients(&self, user: UserId) -> StoreResult<Vec<Patient>>;

    /// Create a recording in the `recording` state for an existing patient
    async fn create_recording(&self, user: UserId, recording: NewRecording) -> StoreResult<Recording>;
    async fn get_recording(&self, user: UserId, id: Uuid) -> StoreResult<RecordingWithPatient>;
    /// Newest first
    async fn list_recordings(&self, user: UserId) -> StoreResult<Vec<RecordingWithPatient>>;
    /// Store the transcription and mark the recording completed
    async fn complete_recording(
        &self,
        user: UserId,
        id: Uuid,
        transcription: String,
    ) -> StoreResult<Recording>;

    async fn insert_report(&self, user: UserId, report: NewReport) -> StoreResult<Report>;
    async fn get_report(&self, user: UserId, id: Uuid) -> StoreResult<Report>;
    /// Newest first
    async fn list_reports(&self, user: UserId) -> StoreResult<Vec<Report>>;
    async fn update_report_status(
        &self,
        user: UserId,
        id: Uuid,
        status: ReportStatus,
    ) -> StoreResult<Report>;

    async fn create_template(&self, user: UserId, template: NewTemplate) -> StoreResult<Template>;
    async fn get_template(&self, user: UserId, id: Uuid) -> StoreResult<Template>;
    /// Newest first
    async fn list_templates(&self, user: UserId) -> StoreResult<Vec<Template>>;
    async fn delete_template(&self, user: UserId, id: Uuid) -> StoreResult<()>;
}
