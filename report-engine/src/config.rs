use serde::{Deserialize, Serialize};

/// Endpoint and model for an OpenAI-compatible chat completions API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
}

/// Endpoint and model for the Anthropic messages API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnthropicSettings {
    pub base_url: String,
    pub model: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    pub max_tokens: u32,
}

/// Configuration for every supported completion provider
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderSettings,
    pub groq: ProviderSettings,
    pub anthropic: AnthropicSettings,
    /// Per-request timeout; there are no retries
    pub request_timeout_secs: u64,
    pub temperature: f32,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderSettings {
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
            },
            groq: ProviderSettings {
                base_url: "https://api.groq.com/openai/v1".to_string(),
                model: "llama-3.1-70b-versatile".to_string(),
            },
            anthropic: AnthropicSettings {
                base_url: "https://api.anthropic.com".to_string(),
                model: "claude-3-5-sonnet-20241022".to_string(),
                api_version: "2023-06-01".to_string(),
                max_tokens: 2048,
            },
            request_timeout_secs: 60,
            temperature: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProvidersConfig::default();
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.groq.model, "llama-3.1-70b-versatile");
        assert_eq!(config.anthropic.api_version, "2023-06-01");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ProvidersConfig =
            serde_json::from_str(r#"{"request_timeout_secs": 15}"#).unwrap();

        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.anthropic.model, "claude-3-5-sonnet-20241022");
    }
}
