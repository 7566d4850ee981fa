use chrono::NaiveDate;
use record_store::{RecordingWithPatient, ReportType};

/// Everything known about a report before its text is generated
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub report_type: ReportType,
    pub patient_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub transcript: String,
    /// Date printed on the document
    pub date: NaiveDate,
}

impl ReportContext {
    pub fn new(report_type: ReportType, transcript: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            report_type,
            patient_name: None,
            date_of_birth: None,
            transcript: transcript.into(),
            date,
        }
    }

    pub fn with_patient(mut self, name: impl Into<String>, date_of_birth: Option<NaiveDate>) -> Self {
        let name = name.into();
        self.patient_name = (!name.trim().is_empty()).then_some(name);
        self.date_of_birth = date_of_birth;
        self
    }

    /// Build from a stored recording joined with its patient
    pub fn from_recording(report_type: ReportType, recording: &RecordingWithPatient, date: NaiveDate) -> Self {
        Self::new(report_type, recording.recording.transcription.clone(), date)
            .with_patient(recording.patient.name.clone(), recording.patient.date_of_birth)
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn formatted_date_of_birth(&self) -> Option<String> {
        self.date_of_birth.map(|dob| dob.format("%Y-%m-%d").to_string())
    }

    pub fn has_transcript(&self) -> bool {
        !self.transcript.trim().is_empty()
    }
}
