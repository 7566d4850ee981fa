/// Anthropic messages API provider
use async_trait::async_trait;
use logger_redacted::redact;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::config::AnthropicSettings;
use crate::error::{ReportError, ReportResult};
use crate::prompt::Prompt;
use crate::providers::{http_client, CompletionProvider, ProviderKind};

pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_version: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(settings: &AnthropicSettings, temperature: f32, timeout_secs: u64) -> ReportResult<Self> {
        Ok(Self {
            client: http_client(timeout_secs)?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_version: settings.api_version.clone(),
            max_tokens: settings.max_tokens,
            temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn malformed(message: impl Into<String>) -> ReportError {
        ReportError::MalformedResponse {
            provider: ProviderKind::Anthropic,
            message: message.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(&self, prompt: &Prompt, api_key: &SecretString) -> ReportResult<String> {
        let request_body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": prompt.system,
            "messages": [
                { "role": "user", "content": prompt.user },
            ],
        });

        debug!(provider = "anthropic", model = %self.model, "Sending messages request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.api_version)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ReportError::Network {
                provider: ProviderKind::Anthropic,
                message: redact(&e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::ProviderStatus {
                provider: ProviderKind::Anthropic,
                status: status.as_u16(),
                body: redact(&body),
            });
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Self::malformed(format!("Failed to parse response: {}", e)))?;

        // Content is a list of blocks; only text blocks carry the report
        let blocks = response_json["content"]
            .as_array()
            .ok_or_else(|| Self::malformed("Response has no content blocks"))?;

        blocks
            .iter()
            .find(|block| block["type"] == "text")
            .and_then(|block| block["text"].as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Self::malformed("No text block in response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProvidersConfig;

    #[test]
    fn test_endpoint() {
        let provider = AnthropicProvider::new(&ProvidersConfig::default().anthropic, 0.3, 60).unwrap();
        assert_eq!(provider.endpoint(), "https://api.anthropic.com/v1/messages");
    }
}
