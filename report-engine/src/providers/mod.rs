pub mod anthropic;
pub mod openai_compatible;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ProvidersConfig;
use crate::error::{ReportError, ReportResult};
use crate::prompt::Prompt;

pub use anthropic::AnthropicProvider;
pub use openai_compatible::OpenAiCompatibleProvider;

/// Supported completion vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Groq,
    Anthropic,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::OpenAi, ProviderKind::Groq, ProviderKind::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Groq => "groq",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "groq" => Ok(ProviderKind::Groq),
            "anthropic" => Ok(ProviderKind::Anthropic),
            _ => Err(ReportError::UnsupportedProvider(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for language-model completion providers
///
/// Each implementation owns its vendor's request and response shapes and
/// returns the generated text, or a `Network`, `ProviderStatus` or
/// `MalformedResponse` error. Implementations must not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(&self, prompt: &Prompt, api_key: &SecretString) -> ReportResult<String>;
}

pub(crate) fn http_client(timeout_secs: u64) -> ReportResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ReportError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Create a provider instance based on configuration
pub fn create_provider(
    kind: ProviderKind,
    config: &ProvidersConfig,
) -> ReportResult<Arc<dyn CompletionProvider>> {
    match kind {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiCompatibleProvider::new(
            kind,
            &config.openai,
            config.temperature,
            config.request_timeout_secs,
        )?)),
        ProviderKind::Groq => Ok(Arc::new(OpenAiCompatibleProvider::new(
            kind,
            &config.groq,
            config.temperature,
            config.request_timeout_secs,
        )?)),
        ProviderKind::Anthropic => Ok(Arc::new(AnthropicProvider::new(
            &config.anthropic,
            config.temperature,
            config.request_timeout_secs,
        )?)),
    }
}

/// Providers available to the orchestrator, keyed by kind
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one provider per supported kind
    pub fn from_config(config: &ProvidersConfig) -> ReportResult<Self> {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            registry.register(create_provider(kind, config)?);
        }
        Ok(registry)
    }

    /// Add or replace the provider for its kind
    pub fn register(&mut self, provider: Arc<dyn CompletionProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    pub fn get(&self, kind: ProviderKind) -> ReportResult<Arc<dyn CompletionProvider>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| ReportError::UnsupportedProvider(kind.to_string()))
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" Groq ".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
        assert_eq!("ANTHROPIC".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
    }

    #[test]
    fn test_unknown_provider_is_unsupported() {
        match "cohere".parse::<ProviderKind>() {
            Err(ReportError::UnsupportedProvider(name)) => assert_eq!(name, "cohere"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_registry_from_config_has_every_kind() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default()).unwrap();
        assert_eq!(
            registry.kinds(),
            vec![ProviderKind::Anthropic, ProviderKind::Groq, ProviderKind::OpenAi]
        );
    }

    #[test]
    fn test_empty_registry_rejects_lookup() {
        let registry = ProviderRegistry::new();
        assert!(matches!(
            registry.get(ProviderKind::Groq),
            Err(ReportError::UnsupportedProvider(_))
        ));
    }
}
