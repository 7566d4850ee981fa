//! Report orchestration for the AlphaScript Engine
//!
//! Turns a consultation transcript into a structured clinical document.
//!
//! # Flow
//!
//! 1. Required input is checked and the provider identifier is parsed before
//!    any network or store access
//! 2. The recording, its patient and the optional template are loaded from the
//!    [`record_store::RecordStore`]
//! 3. System and user prompts are built and sent to exactly one
//!    [`CompletionProvider`] (OpenAI, Groq or Anthropic)
//! 4. If the provider call fails for any reason the report is produced by
//!    [`fallback::generate_fallback`] instead, and the report records that in
//!    its [`record_store::GenerationSource`]
//! 5. The report is persisted with status `completed`
//!
//! The caller's API key is carried as a [`secrecy::SecretString`]. It is only
//! exposed while building the outgoing request headers and is never logged or
//! stored.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use record_store::InMemoryStore;
//! use report_engine::{ProviderRegistry, ProvidersConfig, ReportOrchestrator, ReportRequest};
//! use secrecy::SecretString;
//! use uuid::Uuid;
//!
//! # async fn example(user: Uuid, recording_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let providers = ProviderRegistry::from_config(&ProvidersConfig::default())?;
//! let orchestrator = ReportOrchestrator::new(store, providers);
//!
//! let report = orchestrator
//!     .generate(user, ReportRequest {
//!         recording_id: Some(recording_id),
//!         report_type: Some("soap".to_string()),
//!         template_id: None,
//!         custom_instructions: None,
//!         provider: Some("groq".to_string()),
//!         api_key: Some(SecretString::new("gsk_...".to_string())),
//!     })
//!     .await?;
//!
//! println!("{}", report.content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod providers;
pub mod template;

pub use config::*;
pub use context::ReportContext;
pub use error::*;
pub use orchestrator::*;
pub use prompt::Prompt;
pub use providers::{CompletionProvider, ProviderKind, ProviderRegistry};
pub use template::TemplateResolver;
