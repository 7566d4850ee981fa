use config_engine::AppConfig;
use record_store::{InMemoryStore, RecordStore};
use recording_service::{MockTranscriber, SessionRegistry, TranscriptionProvider};
use report_engine::{ProviderRegistry, ReportOrchestrator, ReportResult, TemplateResolver};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Main AlphaScript server state
#[derive(Clone)]
pub struct AlphaScriptServer {
    /// Server configuration
    pub config: Arc<AppConfig>,
    /// Patients, recordings, reports and templates
    pub store: Arc<dyn RecordStore>,
    /// Report generation pipeline
    pub orchestrator: Arc<ReportOrchestrator>,
    /// Speech-to-text for process-audio
    pub transcriber: Arc<dyn TranscriptionProvider>,
    /// Live recorder sessions
    pub sessions: Arc<SessionRegistry>,
    pub resolver: TemplateResolver,
    started_at: Instant,
}

impl AlphaScriptServer {
    /// Create a server backed by the in-memory store and the configured providers
    pub fn new(config: AppConfig) -> ReportResult<Self> {
        let store = Arc::new(InMemoryStore::with_tokens(config.auth.token_map()));
        let providers = ProviderRegistry::from_config(&config.providers)?;

        info!(
            tokens = config.auth.tokens.len(),
            providers = ?providers.kinds(),
            "Server components initialized"
        );

        Ok(Self::with_components(config, store, providers, Arc::new(MockTranscriber)))
    }

    /// Assemble a server from explicit components
    pub fn with_components(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        providers: ProviderRegistry,
        transcriber: Arc<dyn TranscriptionProvider>,
    ) -> Self {
        let orchestrator = Arc::new(ReportOrchestrator::new(store.clone(), providers));

        Self {
            config: Arc::new(config),
            store,
            orchestrator,
            transcriber,
            sessions: Arc::new(SessionRegistry::new()),
            resolver: TemplateResolver::new(),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
