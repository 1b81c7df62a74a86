//! Error types for the AI bridge.
//!
//! Backends work with the detailed [`LlmError`]. Callers of the bridge only
//! ever see [`BridgeError`], which carries no detail: every failure is
//! reported to the user the same way.

use thiserror::Error;

/// Result type alias using the internal LLM error type.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Detailed failure inside a backend.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Backend/API error from the provider.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Network/connectivity error.
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error (missing credential, bad endpoint).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The reply did not match the expected structure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Serialization(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Opaque Bridge Error
// ─────────────────────────────────────────────────────────────────────────────

/// The single failure a bridge call can produce.
///
/// Transport, auth and malformed-reply conditions are indistinguishable here.
/// The detail is logged at the point of conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("AI bridge request failed")]
pub struct BridgeError;

impl BridgeError {
    /// Log `err` for diagnostics and collapse it.
    pub fn from_llm(operation: &'static str, err: LlmError) -> Self {
        tracing::error!(operation, error = %err, "AI bridge request failed");
        BridgeError
    }
}
