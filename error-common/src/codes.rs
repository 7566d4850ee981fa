// Error codes implementation
// Stable, client-facing error codes for the AlphaScript Engine API

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod authentication {
    pub const INVALID_CREDENTIALS: &str = "AUTH_2001";
    pub const MISSING_TOKEN: &str = "AUTH_2002";
}

pub mod store {
    pub const NOT_FOUND: &str = "STORE_4001";
    pub const CONSTRAINT_VIOLATION: &str = "STORE_4002";
}

pub mod provider {
    pub const UNSUPPORTED_PROVIDER: &str = "PROVIDER_5001";
    pub const PROVIDER_FAILURE: &str = "PROVIDER_5002";
}

pub mod template {
    pub const UNRESOLVED_TOKENS: &str = "TEMPLATE_6001";
}

pub mod recording {
    pub const INVALID_TRANSITION: &str = "RECORDING_7001";
    pub const SESSION_NOT_FOUND: &str = "RECORDING_7002";
    pub const TRANSCRIPTION_FAILED: &str = "RECORDING_7003";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_9001";
}
