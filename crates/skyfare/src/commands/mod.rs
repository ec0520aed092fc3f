//! Command dispatch: bridges CLI args -> core session -> output formatting.

pub mod config_cmd;
pub mod locations;
pub mod search;

use skyfare_config::Config;
use skyfare_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Locations(args) => locations::handle(session, args, global).await,
        Command::Search(args) => search::handle(session, args, cfg, global).await,
        // Handled before a session exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not use a session".into(),
        )),
    }
}

/// Load the config file (or `--config`) and apply command-line overrides.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = match global.config {
        Some(ref path) => skyfare_config::load_config_from(path)?,
        None => skyfare_config::load_config()?,
    };
    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
    Ok(cfg)
}

pub fn build_session(cfg: &Config) -> Result<Session, CliError> {
    let session_config = skyfare_config::to_session_config(cfg)?;
    Ok(Session::new(session_config)?)
}
