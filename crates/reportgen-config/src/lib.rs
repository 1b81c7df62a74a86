//! Configuration system for reportgen.
//!
//! Provides TOML-based configuration with:
//! - `[ai]` settings for the generative backend (model, endpoint, timeout)
//! - `[export]` settings for JSON/PNG output
//! - `[ui]` settings for the interactive view
//! - Config file layering (XDG user config + project-local overrides)
//! - Credential resolution (build-time env → runtime env → persisted file)
//!
//! The persisted credential file is the only state the application itself
//! writes between sessions.

pub mod credential;
pub mod discovery;
pub mod error;
pub mod types;

pub use credential::{
    CredentialResolver, CredentialSource, CredentialStore, ResolvedCredential, BUILD_TIME_KEY,
    RUNTIME_ENV_VARS,
};
pub use discovery::{
    ConfigSource, LoadedConfig, load_config, load_config_file, load_config_with_options, save_config,
    user_config_path, xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use types::*;
