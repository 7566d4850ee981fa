use chrono::Utc;
use logger_redacted::redact;
use record_store::{
    GenerationSource, NewReport, RecordStore, Report, ReportStatus, ReportType, UserId,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::ReportContext;
use crate::error::{ReportError, ReportResult};
use crate::fallback::generate_fallback;
use crate::prompt::build_prompt;
use crate::providers::{ProviderKind, ProviderRegistry};

/// Provider used when the request does not name one
pub const DEFAULT_PROVIDER: &str = "openai";

/// A request to generate one report from a stored recording
#[derive(Debug)]
pub struct ReportRequest {
    pub recording_id: Option<Uuid>,
    /// Raw report type; values outside the known set generate a consultation note
    pub report_type: Option<String>,
    pub template_id: Option<Uuid>,
    pub custom_instructions: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<SecretString>,
}

/// Coordinates prompt building, the provider call, fallback and persistence
pub struct ReportOrchestrator {
    store: Arc<dyn RecordStore>,
    providers: ProviderRegistry,
}

impl ReportOrchestrator {
    pub fn new(store: Arc<dyn RecordStore>, providers: ProviderRegistry) -> Self {
        Self { store, providers }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Generate and persist a report for `user`
    ///
    /// Provider failures never surface as errors: the report is built from
    /// fallback text and its `generation_source` says so. Errors are returned
    /// for missing input, an unsupported provider and store failures.
    pub async fn generate(&self, user: UserId, request: ReportRequest) -> ReportResult<Report> {
        let recording_id = request
            .recording_id
            .ok_or(ReportError::MissingInput { field: "recording_id" })?;
        let raw_report_type = request
            .report_type
            .filter(|t| !t.trim().is_empty())
            .ok_or(ReportError::MissingInput { field: "report_type" })?;
        let api_key = request
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(ReportError::MissingInput { field: "api_key" })?;

        let kind: ProviderKind = request
            .provider
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER)
            .parse()?;
        let provider = self.providers.get(kind)?;

        let recording = self.store.get_recording(user, recording_id).await?;

        let template = match request.template_id {
            Some(template_id) => match self.store.get_template(user, template_id).await {
                Ok(template) => Some(template),
                Err(e) => {
                    debug!(%template_id, error = %e, "Template unavailable, generating without it");
                    None
                }
            },
            None => None,
        };
        let template_body = template.as_ref().map(|t| t.content.as_str());

        let report_type = ReportType::resolve(&raw_report_type);
        let ctx = ReportContext::from_recording(report_type, &recording, Utc::now().date_naive());
        let prompt = build_prompt(&ctx, template_body, request.custom_instructions.as_deref());

        let (content, generation_source) = match provider.complete(&prompt, &api_key).await {
            Ok(content) => (
                content,
                GenerationSource::Provider {
                    provider: kind.to_string(),
                },
            ),
            Err(e) => {
                warn!(
                    provider = %kind,
                    failure = e.failure_kind(),
                    error = %redact(&e.to_string()),
                    "Provider call failed, using fallback report"
                );
                (
                    generate_fallback(&ctx, template_body),
                    GenerationSource::Fallback {
                        provider: kind.to_string(),
                        failure: e.failure_kind().to_string(),
                    },
                )
            }
        };
        drop(api_key);

        let report = self
            .store
            .insert_report(user, NewReport {
                recording_id,
                patient_id: recording.recording.patient_id,
                report_type,
                title: format!(
                    "{} - {}",
                    report_type.as_str().to_uppercase(),
                    recording.patient.name
                ),
                content,
                status: ReportStatus::Completed,
                generation_source,
            })
            .await?;

        info!(
            report_id = %report.id,
            report_type = %report.report_type,
            fallback = report.generation_source.is_fallback(),
            "Report generated"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use record_store::{InMemoryStore, NewPatient, NewRecording, NewTemplate};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::prompt::Prompt;
    use crate::providers::CompletionProvider;

    struct StubProvider {
        kind: ProviderKind,
        reply: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn complete(&self, _prompt: &Prompt, _api_key: &SecretString) -> ReportResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(ReportError::ProviderStatus {
                provider: self.kind,
                status: 401,
                body: "invalid api key".to_string(),
            })
        }
    }

    struct Fixture {
        store: Arc<InMemoryStore>,
        user: UserId,
        recording_id: Uuid,
    }

    async fn fixture(transcript: &str) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let user = Uuid::new_v4();
        let patient = store
            .create_patient(user, NewPatient {
                name: "Jane Doe".to_string(),
                date_of_birth: None,
            })
            .await
            .unwrap();
        let recording = store
            .create_recording(user, NewRecording {
                patient_id: patient.id,
                title: "Visit".to_string(),
            })
            .await
            .unwrap();
        store
            .complete_recording(user, recording.id, transcript.to_string())
            .await
            .unwrap();

        Fixture {
            store,
            user,
            recording_id: recording.id,
        }
    }

    fn orchestrator(store: Arc<InMemoryStore>, provider: Arc<StubProvider>) -> ReportOrchestrator {
        let mut registry = ProviderRegistry::new();
        registry.register(provider);
        ReportOrchestrator::new(store, registry)
    }

    fn stub(reply: Option<&str>) -> Arc<StubProvider> {
        Arc::new(StubProvider {
            kind: ProviderKind::OpenAi,
            reply: reply.map(str::to_string),
            calls: AtomicUsize::new(0),
        })
    }

    fn request(recording_id: Uuid, report_type: &str) -> ReportRequest {
        ReportRequest {
            recording_id: Some(recording_id),
            report_type: Some(report_type.to_string()),
            template_id: None,
            custom_instructions: None,
            provider: Some("openai".to_string()),
            api_key: Some(SecretString::new("sk-test-key".to_string())),
        }
    }

    #[tokio::test]
    async fn test_provider_text_is_persisted() {
        let fx = fixture("Patient reports chest pain").await;
        let provider = stub(Some("SOAP NOTE\nS: chest pain"));
        let orchestrator = orchestrator(fx.store.clone(), provider.clone());

        let report = orchestrator
            .generate(fx.user, request(fx.recording_id, "soap"))
            .await
            .unwrap();

        assert_eq!(report.content, "SOAP NOTE\nS: chest pain");
        assert_eq!(report.title, "SOAP - Jane Doe");
        assert_eq!(report.status, ReportStatus::Completed);
        assert!(!report.generation_source.is_fallback());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let stored = fx.store.get_report(fx.user, report.id).await.unwrap();
        assert_eq!(stored, report);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let fx = fixture("Patient reports chest pain").await;
        let orchestrator = orchestrator(fx.store.clone(), stub(None));

        let report = orchestrator
            .generate(fx.user, request(fx.recording_id, "soap"))
            .await
            .unwrap();

        assert!(report.content.contains("SOAP NOTE"));
        assert!(report.content.contains("chest pain"));
        assert_eq!(
            report.generation_source,
            GenerationSource::Fallback {
                provider: "openai".to_string(),
                failure: "http_status".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_input_touches_nothing() {
        let fx = fixture("").await;
        let provider = stub(Some("text"));
        let orchestrator = orchestrator(fx.store.clone(), provider.clone());

        let mut req = request(fx.recording_id, "soap");
        req.api_key = Some(SecretString::new("  ".to_string()));
        let err = orchestrator.generate(fx.user, req).await.unwrap_err();
        assert!(matches!(err, ReportError::MissingInput { field: "api_key" }));

        let mut req = request(fx.recording_id, "soap");
        req.recording_id = None;
        let err = orchestrator.generate(fx.user, req).await.unwrap_err();
        assert!(matches!(err, ReportError::MissingInput { field: "recording_id" }));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(fx.store.list_reports(fx.user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_provider_is_rejected_before_call() {
        let fx = fixture("").await;
        let provider = stub(Some("text"));
        let orchestrator = orchestrator(fx.store.clone(), provider.clone());

        let mut req = request(fx.recording_id, "soap");
        req.provider = Some("cohere".to_string());
        let err = orchestrator.generate(fx.user, req).await.unwrap_err();

        assert!(matches!(err, ReportError::UnsupportedProvider(ref name) if name == "cohere"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_report_type_generates_consultation() {
        let fx = fixture("Follow up in two weeks").await;
        let orchestrator = orchestrator(fx.store.clone(), stub(None));

        let report = orchestrator
            .generate(fx.user, request(fx.recording_id, "radiology"))
            .await
            .unwrap();

        assert_eq!(report.report_type, ReportType::Consultation);
        assert!(report.content.starts_with("CONSULTATION NOTE"));
        assert_eq!(report.title, "CONSULTATION - Jane Doe");
    }

    #[tokio::test]
    async fn test_template_is_used_in_fallback_and_missing_template_ignored() {
        let fx = fixture("Chest pain").await;
        let template = fx
            .store
            .create_template(fx.user, NewTemplate {
                name: "Short".to_string(),
                template_type: ReportType::Soap,
                content: "Note for {patient_name}: {transcription}".to_string(),
            })
            .await
            .unwrap();
        let orchestrator = orchestrator(fx.store.clone(), stub(None));

        let mut req = request(fx.recording_id, "soap");
        req.template_id = Some(template.id);
        let report = orchestrator.generate(fx.user, req).await.unwrap();
        assert_eq!(report.content, "Note for Jane Doe: Chest pain");

        let mut req = request(fx.recording_id, "soap");
        req.template_id = Some(Uuid::new_v4());
        let report = orchestrator.generate(fx.user, req).await.unwrap();
        assert!(report.content.starts_with("SOAP NOTE"));
    }

    #[tokio::test]
    async fn test_unknown_recording_is_not_found() {
        let fx = fixture("").await;
        let orchestrator = orchestrator(fx.store.clone(), stub(Some("text")));

        let err = orchestrator
            .generate(fx.user, request(Uuid::new_v4(), "soap"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Store(record_store::StoreError::NotFound { .. })));
    }
}
