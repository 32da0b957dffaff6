//! Greeting config service: entry point.
//!
//! Serves the two display names used by the greeting page (`birthdayName`
//! and `wisherName`) and lets an admin change them with a shared password.
//!
//! # Usage
//!
//! ```text
//! greeting-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>               TOML settings file
//!   --bind <IP>                   Bind address [default: 0.0.0.0]
//!   --port <PORT>                 Listen port [default: 8888]
//!   --storage <memory|file>       Record backend [default: file]
//!   --data-dir <PATH>             File backend root [default: data]
//!   --admin-password <PW>         Admin password
//!   --admin-password-file <PATH>  File containing the admin password
//!   --allow-origin <ORIGIN>       CORS origin (repeatable, `*` for any)
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                        | Flag                    |
//! |---------------------------------|-------------------------|
//! | `GREETING_CONFIG`               | `--config`              |
//! | `GREETING_BIND`                 | `--bind`                |
//! | `GREETING_PORT`                 | `--port`                |
//! | `GREETING_STORAGE`              | `--storage`             |
//! | `GREETING_DATA_DIR`             | `--data-dir`            |
//! | `GREETING_ADMIN_PASSWORD`       | `--admin-password`      |
//! | `GREETING_ADMIN_PASSWORD_FILE`  | `--admin-password-file` |
//!
//! Flags and variables override the TOML file, which overrides the built-in
//! defaults.  Startup fails if no admin password is configured.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tracing::info;
use tracing_subscriber::EnvFilter;

use greeting_core::ConfigService;
use greeting_server::infrastructure::{build_store, run_server, shutdown_signal};
use greeting_server::settings::{
    load_settings_file, parse_bind_addr, CorsPolicy, CredentialSource, ServerSettings,
    SettingsFile, StorageBackend,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Greeting page configuration service.
///
/// Every option is optional; unset options fall back to the settings file
/// and then to built-in defaults.
#[derive(Debug, Parser)]
#[command(
    name = "greeting-server",
    about = "HTTP store for the greeting page's display names",
    version
)]
struct Cli {
    /// TOML settings file.
    #[arg(long, env = "GREETING_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind to.
    #[arg(long, env = "GREETING_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "GREETING_PORT")]
    port: Option<u16>,

    /// Where the record is kept.
    #[arg(long, value_enum, env = "GREETING_STORAGE")]
    storage: Option<StorageBackend>,

    /// Root directory of the file backend.
    #[arg(long, env = "GREETING_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Admin password required for writes.
    #[arg(long, env = "GREETING_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// File containing the admin password (trimmed).
    #[arg(long, env = "GREETING_ADMIN_PASSWORD_FILE")]
    admin_password_file: Option<PathBuf>,

    /// Browser origin allowed to call the API.  Repeat for several; `*`
    /// allows any origin.
    #[arg(long = "allow-origin")]
    allow_origins: Vec<String>,
}

impl Cli {
    /// Layers the CLI values over `file` to produce runtime settings and the
    /// credential source.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address or a CORS origin is invalid, or
    /// if no admin password is configured anywhere.
    fn into_settings(self, file: SettingsFile) -> anyhow::Result<(ServerSettings, CredentialSource)> {
        let mut settings = ServerSettings::from_file(&file).context("invalid settings file")?;

        if self.bind.is_some() || self.port.is_some() {
            let ip = self.bind.unwrap_or(file.server.bind_address);
            let port = self.port.unwrap_or(file.server.port);
            settings.bind_addr = parse_bind_addr(&ip, port)?;
        }
        if let Some(backend) = self.storage {
            settings.storage.backend = backend;
        }
        if let Some(data_dir) = self.data_dir {
            settings.storage.data_dir = data_dir;
        }
        if !self.allow_origins.is_empty() {
            settings.cors = CorsPolicy::from_origins(&self.allow_origins)?;
        }

        let credential = CredentialSource::select(
            self.admin_password.map(SecretString::from),
            self.admin_password_file.or(file.auth.password_file),
        )?;

        Ok((settings, credential))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut cli = Cli::parse();

    let file = match cli.config.take() {
        Some(path) => load_settings_file(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => SettingsFile::default(),
    };

    let (settings, credential_source) = cli.into_settings(file)?;
    let credential = credential_source
        .load()
        .context("failed to load admin password")?;

    info!(
        "greeting config service starting: bind={}, storage={:?}",
        settings.bind_addr, settings.storage.backend
    );

    let store = build_store(&settings.storage);
    let service = ConfigService::new(store, credential);

    run_server(&settings, service, shutdown_signal()).await?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
