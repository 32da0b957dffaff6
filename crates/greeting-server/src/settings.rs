//! Runtime settings for the config service.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. CLI flags (each with an environment variable fallback, see `main.rs`)
//! 2. An optional TOML file passed with `--config`
//! 3. Built-in defaults
//!
//! # TOML layout
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8888
//! allowed_origins = ["https://greeting.example"]
//!
//! [storage]
//! backend = "file"          # or "memory"
//! data_dir = "data"
//! store_name = "birthday-config"
//! key = "names"
//!
//! [auth]
//! password_file = "/run/secrets/GREETING_ADMIN_PASSWORD"
//! ```
//!
//! Every field has a serde default, so an empty file is valid.  The admin
//! password itself is never read from this file; only the path of a secret
//! file may appear here.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use greeting_core::AdminCredential;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings resolution.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings or secret file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML settings file could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The bind address and port do not form a socket address.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    /// A CORS origin is not a valid header value.
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    /// Neither an inline password nor a password file was configured.
    #[error("no admin password configured (set GREETING_ADMIN_PASSWORD or GREETING_ADMIN_PASSWORD_FILE)")]
    MissingCredential,

    /// The configured password was empty or only whitespace.
    #[error("admin password from {source_name} is empty")]
    EmptyCredential { source_name: String },
}

// ── TOML schema ───────────────────────────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub auth: AuthSection,
}

/// `[server]`: listener and CORS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed to call the API from a browser.  Empty disables CORS;
    /// `"*"` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// `[storage]`: which backend holds the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default = "default_key")]
    pub key: String,
}

/// `[auth]`: where the admin password lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,
}

/// Storage backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; the record is lost on restart.
    Memory,
    /// A JSON file under `data_dir`.
    #[default]
    File,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8888
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_store_name() -> String {
    "birthday-config".to_string()
}
fn default_key() -> String {
    "names".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            store_name: default_store_name(),
            key: default_key(),
        }
    }
}

/// Reads and parses the TOML settings file at `path`.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] if the file cannot be read and
/// [`SettingsError::Parse`] if it is not valid TOML for [`SettingsFile`].
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

// ── Resolved settings ─────────────────────────────────────────────────────────

/// Where and how the record is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub store_name: String,
    pub key: String,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsPolicy {
    /// No CORS headers; the presentation layer must be same-origin.
    Disabled,
    /// Any origin.
    Any,
    /// Only the listed origins.
    List(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Builds a policy from configured origin strings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidOrigin`] for an origin that is not a
    /// valid header value.
    pub fn from_origins(origins: &[String]) -> Result<Self, SettingsError> {
        if origins.is_empty() {
            return Ok(Self::Disabled);
        }
        if origins.iter().any(|o| o == "*") {
            return Ok(Self::Any);
        }
        origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| SettingsError::InvalidOrigin(o.clone()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub storage: StorageSettings,
    pub cors: CorsPolicy,
}

impl ServerSettings {
    /// Resolves a parsed settings file into runtime settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address or a CORS origin is invalid.
    pub fn from_file(file: &SettingsFile) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: parse_bind_addr(&file.server.bind_address, file.server.port)?,
            storage: StorageSettings {
                backend: file.storage.backend,
                data_dir: file.storage.data_dir.clone(),
                store_name: file.storage.store_name.clone(),
                key: file.storage.key.clone(),
            },
            cors: CorsPolicy::from_origins(&file.server.allowed_origins)?,
        })
    }
}

impl Default for ServerSettings {
    /// | Field      | Default                              |
    /// |------------|--------------------------------------|
    /// | bind_addr  | `0.0.0.0:8888`                       |
    /// | storage    | file backend, `data/birthday-config/names.json` |
    /// | cors       | disabled                             |
    fn default() -> Self {
        Self {
            // Valid by construction: both parts come from the default helpers.
            bind_addr: SocketAddr::from(([0, 0, 0, 0], default_port())),
            storage: StorageSettings {
                backend: StorageBackend::File,
                data_dir: default_data_dir(),
                store_name: default_store_name(),
                key: default_key(),
            },
            cors: CorsPolicy::Disabled,
        }
    }
}

/// Joins an IP string and a port into a socket address.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidBindAddress`] when `ip` is not an IP
/// address literal.
pub fn parse_bind_addr(ip: &str, port: u16) -> Result<SocketAddr, SettingsError> {
    let joined = if ip.contains(':') {
        format!("[{ip}]:{port}")
    } else {
        format!("{ip}:{port}")
    };
    joined
        .parse()
        .map_err(|_| SettingsError::InvalidBindAddress(joined))
}

// ── Credential source ─────────────────────────────────────────────────────────

/// Where the admin password comes from.
#[derive(Debug)]
pub enum CredentialSource {
    /// Supplied directly via flag or environment variable.
    Inline(SecretString),
    /// Read from a secret file (e.g. a Docker/Kubernetes secret mount).
    File(PathBuf),
}

impl CredentialSource {
    /// Picks a source, preferring an inline password over a password file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingCredential`] when neither is set.
    pub fn select(
        inline: Option<SecretString>,
        file: Option<PathBuf>,
    ) -> Result<Self, SettingsError> {
        match (inline, file) {
            (Some(secret), _) => Ok(Self::Inline(secret)),
            (None, Some(path)) => Ok(Self::File(path)),
            (None, None) => Err(SettingsError::MissingCredential),
        }
    }

    /// Loads the credential.  Secret files are trimmed of surrounding
    /// whitespace (a trailing newline is the usual case).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the secret file cannot be read and
    /// [`SettingsError::EmptyCredential`] if the password is empty or only
    /// whitespace.
    pub fn load(self) -> Result<AdminCredential, SettingsError> {
        match self {
            Self::Inline(secret) => AdminCredential::new(secret.expose_secret())
                .map_err(|_| SettingsError::EmptyCredential {
                    source_name: "command line or environment".to_string(),
                }),
            Self::File(path) => {
                let content =
                    std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                        path: path.clone(),
                        source,
                    })?;
                AdminCredential::new(content.trim()).map_err(|_| {
                    SettingsError::EmptyCredential {
                        source_name: path.display().to_string(),
                    }
                })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
