//! Common error handling utilities for the AlphaScript Engine
//!
//! Shared error types and stable error codes used by every crate in the
//! workspace. Crate-specific errors (record store, report engine, recording
//! service) stay local to their crates and are mapped onto these codes at the
//! HTTP boundary.
//!
//! # Error Categories
//!
//! - **Validation**: missing or malformed request input
//! - **Authentication**: unknown or missing bearer token
//! - **Store**: record-store lookups and constraint violations
//! - **Provider**: language-model provider selection
//! - **Template**: unresolved template placeholders
//! - **Recording**: recorder state transitions and transcription
//!
//! # Example
//!
//! ```rust
//! use error_common::{AppError, Result};
//!
//! fn bind_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| AppError::ConfigError(format!("invalid port: {raw}")))
//! }
//!
//! assert!(bind_port("8080").is_ok());
//! assert!(bind_port("http").is_err());
//! ```

pub mod types;
pub mod codes;

pub use types::*;
pub use codes::*;
