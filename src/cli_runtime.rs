use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mk7::remote::RemoteClient;
use mk7::session::SessionStore;
use mk7::store::LocalStore;

use crate::Commands;

const BACKEND_URL_ENV: &str = "MK7_BACKEND_URL";

#[derive(Parser)]
#[command(name = "mk7")]
#[command(about = "MK7 trading insights client", long_about = None)]
pub(crate) struct Cli {
    /// Client state directory (defaults to $MK7_HOME or ~/.mk7)
    #[arg(long, global = true, value_name = "PATH")]
    state_dir: Option<PathBuf>,

    /// Backend base URL (overrides $MK7_BACKEND_URL and config.json)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) type CliSession = SessionStore<RemoteClient, LocalStore>;

pub(crate) struct ClientContext {
    pub(crate) store: LocalStore,
    api_url_override: Option<String>,
}

impl ClientContext {
    pub(crate) fn api_url(&self) -> Result<String> {
        if let Some(url) = &self.api_url_override {
            return Ok(url.clone());
        }
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                return Ok(url.to_string());
            }
        }
        let cfg = self.store.read_config()?;
        Ok(cfg.api_url().to_string())
    }

    pub(crate) fn remote(&self) -> Result<RemoteClient> {
        let cfg = self.store.read_config()?;
        let url = self.api_url()?;
        match cfg.connect_timeout_secs {
            Some(secs) => RemoteClient::with_connect_timeout(&url, Duration::from_secs(secs)),
            None => RemoteClient::new(&url),
        }
    }

    /// Fresh, not yet restored session.
    pub(crate) fn session(&self) -> Result<CliSession> {
        Ok(SessionStore::new(self.remote()?, self.store.clone()))
    }

    pub(crate) fn restored_session(&self) -> Result<CliSession> {
        let mut session = self.session()?;
        session.restore_session();
        Ok(session)
    }
}

pub(crate) fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let root = match cli.state_dir {
        Some(dir) => dir,
        None => LocalStore::default_root().context("resolve state dir")?,
    };
    let ctx = ClientContext {
        store: LocalStore::open(&root)?,
        api_url_override: cli.api_url,
    };

    crate::cli_exec::handle_command(&ctx, cli.command)
}

// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
