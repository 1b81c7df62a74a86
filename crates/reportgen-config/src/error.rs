//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and credential storage.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No directory is available to hold the credential file.
    #[error("no config directory available; set REPORTGEN_CONFIG_DIR")]
    NoConfigDir,

    /// An empty credential was offered for storage.
    #[error("credential must not be empty")]
    EmptyCredential,

    /// Failed to read, write or remove the credential file.
    #[error("credential file '{path}': {source}")]
    Credential {
        path: String,
        source: std::io::Error,
    },
}
