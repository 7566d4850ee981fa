use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::app::AppConfig;
use crate::error::{ConfigError, Result};

/// Environment variable prefix, e.g. `ALPHASCRIPT__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "ALPHASCRIPT";
pub const ENV_SEPARATOR: &str = "__";

/// Loads [`AppConfig`] from built-in defaults, an optional file and the environment
///
/// Later sources override earlier ones key by key, so a file or variable only
/// needs to name the values it changes.
pub struct ConfigEngine;

impl ConfigEngine {
    /// Defaults, then `path` (YAML, TOML or JSON by extension), then environment
    pub fn load(path: Option<&str>) -> Result<AppConfig> {
        let defaults = Self::defaults_yaml()?;
        let mut builder = Config::builder().add_source(File::from_str(&defaults, FileFormat::Yaml));

        if let Some(path) = path {
            debug!(path, "Loading configuration file");
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Defaults overlaid with an inline YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<AppConfig> {
        let defaults = Self::defaults_yaml()?;
        let config = Config::builder()
            .add_source(File::from_str(&defaults, FileFormat::Yaml))
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        Self::finish(config)
    }

    fn defaults_yaml() -> Result<String> {
        Ok(serde_yaml::to_string(&AppConfig::default())?)
    }

    fn finish(config: Config) -> Result<AppConfig> {
        let app: AppConfig = config.try_deserialize()?;
        Self::validate(&app)?;
        Ok(app)
    }

    fn validate(app: &AppConfig) -> Result<()> {
        if app.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be non-zero".to_string()));
        }
        if app.providers.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "providers.request_timeout_secs must be non-zero".to_string(),
            ));
        }
        if let Some(grant) = app.auth.tokens.iter().find(|g| g.token.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "auth.tokens entry for user {} has an empty token",
                grant.user_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logger_redacted::LogFormat;

    #[test]
    fn test_defaults_round_trip_through_loader() {
        let config = ConfigEngine::from_yaml_str("{}").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
        assert_eq!(config.providers.groq.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.providers.anthropic.api_version, "2023-06-01");
        assert_eq!(config.providers.request_timeout_secs, 60);
        assert!(config.auth.tokens.is_empty());
    }

    #[test]
    fn test_partial_file_overrides_only_named_keys() {
        let config = ConfigEngine::from_yaml_str(
            r#"
server:
  port: 9090
providers:
  anthropic:
    model: claude-3-haiku-20240307
logging:
  format: json
auth:
  tokens:
    - token: dev-token
      user_id: 2d1f3c4e-5a6b-4c7d-8e9f-0a1b2c3d4e5f
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.providers.anthropic.model, "claude-3-haiku-20240307");
        assert_eq!(config.providers.anthropic.base_url, "https://api.anthropic.com");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.auth.tokens.len(), 1);
        assert_eq!(config.auth.tokens[0].token, "dev-token");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ConfigEngine::from_yaml_str("providers:\n  request_timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_bind_address() {
        let config = ConfigEngine::from_yaml_str("server:\n  host: 127.0.0.1\n  port: 3000\n").unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
    }
}
