//! Configuration management for the AlphaScript Engine
//!
//! Configuration is layered, with later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. An optional file passed with `--config` (YAML, TOML or JSON)
//! 3. Environment variables prefixed with `ALPHASCRIPT__`, using `__` between
//!    nested keys
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigEngine;
//!
//! // ALPHASCRIPT__SERVER__PORT=9000 ALPHASCRIPT__PROVIDERS__REQUEST_TIMEOUT_SECS=30
//! let config = ConfigEngine::load(Some("alphascript.yaml"))?;
//! println!("listening on {}", config.server.bind_address());
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod app;
pub mod engine;
pub mod error;

pub use app::*;
pub use engine::*;
pub use error::*;
