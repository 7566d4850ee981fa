/// OpenAI-compatible chat completions provider
///
/// Serves both OpenAI and Groq; they differ only in base URL and model.
use async_trait::async_trait;
use logger_redacted::redact;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::error::{ReportError, ReportResult};
use crate::prompt::Prompt;
use crate::providers::{http_client, CompletionProvider, ProviderKind};

pub struct OpenAiCompatibleProvider {
    kind: ProviderKind,
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        kind: ProviderKind,
        settings: &ProviderSettings,
        temperature: f32,
        timeout_secs: u64,
    ) -> ReportResult<Self> {
        Ok(Self {
            kind,
            client: http_client(timeout_secs)?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, prompt: &Prompt, api_key: &SecretString) -> ReportResult<String> {
        let request_body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "temperature": self.temperature,
        });

        debug!(provider = %self.kind, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ReportError::Network {
                provider: self.kind,
                message: redact(&e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::ProviderStatus {
                provider: self.kind,
                status: status.as_u16(),
                body: redact(&body),
            });
        }

        let response_json: serde_json::Value =
            response.json().await.map_err(|e| ReportError::MalformedResponse {
                provider: self.kind,
                message: format!("Failed to parse response: {}", e),
            })?;

        response_json["choices"]
            .get(0)
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ReportError::MalformedResponse {
                provider: self.kind,
                message: "No content in response".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = OpenAiCompatibleProvider::new(
            ProviderKind::Groq,
            &ProviderSettings {
                base_url: "https://api.groq.com/openai/v1/".to_string(),
                model: "llama-3.1-70b-versatile".to_string(),
            },
            0.3,
            60,
        )
        .unwrap();

        assert_eq!(provider.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(provider.kind(), ProviderKind::Groq);
    }
}
