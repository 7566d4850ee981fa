use logger_redacted::LoggerConfig;
use report_engine::ProvidersConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level configuration for the AlphaScript server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub providers: ProvidersConfig,
    pub logging: LoggerConfig,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server name shown in the health response
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "AlphaScript Engine".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bearer tokens accepted by the in-memory record store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub tokens: Vec<TokenGrant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token: String,
    pub user_id: Uuid,
}

impl AuthSettings {
    pub fn token_map(&self) -> impl Iterator<Item = (String, Uuid)> + '_ {
        self.tokens.iter().map(|grant| (grant.token.clone(), grant.user_id))
    }
}
