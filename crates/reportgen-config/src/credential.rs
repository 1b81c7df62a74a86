//! AI credential resolution.
//!
//! Resolution order:
//! 1. Value injected at build time (`GEMINI_API_KEY` when compiling)
//! 2. Runtime environment (`GEMINI_API_KEY`, then `API_KEY`)
//! 3. Value persisted from a previous session (`<config dir>/credential`)
//! 4. None: the caller prompts for one

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{ConfigError, Result};

/// Credential baked in at compile time, if any.
pub const BUILD_TIME_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

/// Runtime environment variables consulted, in order.
pub const RUNTIME_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// File name of the persisted credential inside the config directory.
const CREDENTIAL_FILE: &str = "credential";

/// Where a resolved credential came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    BuildTime,
    EnvVar(String),
    Stored,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildTime => write!(f, "build-time"),
            Self::EnvVar(name) => write!(f, "env:{name}"),
            Self::Stored => write!(f, "stored"),
        }
    }
}

/// A credential together with its origin.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub value: String,
    pub source: CredentialSource,
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("value", &"***")
            .field("source", &self.source)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed persistence for a user-entered credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside a config directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CREDENTIAL_FILE))
    }

    /// Store inside the default config directory.
    pub fn default_location() -> Result<Self> {
        crate::xdg_config_dir()
            .map(|d| Self::in_dir(&d))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credential. Missing or blank files yield `None`.
    pub fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let value = contents.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::Credential {
                path: self.path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Persist a credential, owner-readable only on unix.
    pub fn save(&self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        let io_err = |e| ConfigError::Credential {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, value).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        tracing::debug!(path = %self.path.display(), "credential stored");
        Ok(())
    }

    /// Remove the stored credential. Removing a missing file is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConfigError::Credential {
                path: self.path.display().to_string(),
                source: e,
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Walks the credential sources in order.
pub struct CredentialResolver {
    build_time: Option<String>,
    env: EnvLookup,
    store: CredentialStore,
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("build_time", &self.build_time.is_some())
            .field("store", &self.store)
            .finish()
    }
}

impl CredentialResolver {
    /// Resolver using the compiled-in value and the process environment.
    pub fn new(store: CredentialStore) -> Self {
        Self {
            build_time: BUILD_TIME_KEY.map(str::to_string),
            env: Box::new(|name| std::env::var(name).ok()),
            store,
        }
    }

    /// Override the build-time value.
    pub fn with_build_time(mut self, value: Option<impl Into<String>>) -> Self {
        self.build_time = value.map(Into::into);
        self
    }

    /// Override how environment variables are looked up.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// First non-blank credential, or `None`.
    ///
    /// An unreadable stored file is logged and treated as absent.
    pub fn resolve(&self) -> Option<ResolvedCredential> {
        if let Some(value) = non_blank(self.build_time.as_deref()) {
            return Some(ResolvedCredential {
                value,
                source: CredentialSource::BuildTime,
            });
        }

        for name in RUNTIME_ENV_VARS {
            if let Some(value) = non_blank((self.env)(name).as_deref()) {
                return Some(ResolvedCredential {
                    value,
                    source: CredentialSource::EnvVar((*name).to_string()),
                });
            }
        }

        match self.store.load() {
            Ok(Some(value)) => Some(ResolvedCredential {
                value,
                source: CredentialSource::Stored,
            }),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "stored credential unreadable");
                None
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
