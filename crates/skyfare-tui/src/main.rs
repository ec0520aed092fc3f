//! `skyfare-tui`: Terminal flight search.
//!
//! Three screens mirror the booking flow: Search (form with live airport
//! suggestions), Results (offer list with a preview panel) and Detail
//! (price summary plus one collapsible panel per trip).
//!
//! Logs go to a file (default `/tmp/skyfare-tui.log`) so they never
//! corrupt the terminal. A background data bridge forwards session events
//! and store changes into the action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod screen;
mod screens;
mod theme;
mod terminal;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use skyfare_core::Session;

use crate::app::App;

/// Search flights from the terminal.
#[derive(Parser, Debug)]
#[command(name = "skyfare-tui", version, about)]
struct Cli {
    /// Location service base URL (overrides the config file)
    #[arg(short = 'u', long, env = "SKYFARE_API_URL")]
    api_url: Option<String>,

    /// Path to an alternate config file
    #[arg(short = 'c', long, env = "SKYFARE_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/skyfare-tui.log)
    #[arg(long, default_value = "/tmp/skyfare-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Writing to stdout/stderr would corrupt the TUI.
/// The returned guard must live until exit so buffered logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "skyfare_tui={log_level},skyfare_core={log_level},skyfare_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("skyfare-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file + env, then CLI overrides.
fn build_session(cli: &Cli) -> Result<Session> {
    let mut cfg = match cli.config {
        Some(ref path) => skyfare_config::load_config_from(path),
        None => skyfare_config::load_config(),
    }
    .wrap_err("failed to load configuration")?;

    if let Some(ref url) = cli.api_url {
        cfg.api.base_url.clone_from(url);
    }

    let session_config =
        skyfare_config::to_session_config(&cfg).wrap_err("invalid configuration")?;
    let session = Session::new(session_config).wrap_err("failed to set up the location client")?;
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before the terminal starts, so its restore hook wraps this one
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()?;

    let _log_guard = setup_tracing(&cli);

    let session = build_session(&cli)?;
    info!(api_url = %session.config().api_url, "starting skyfare-tui");

    let mut app = App::new(session);
    app.run().await?;

    Ok(())
}
