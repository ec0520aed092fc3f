//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{Confirm, Input, Password, Select};

use skyfare_config::Config;
use skyfare_core::CabinClass;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

const MASKED: &str = "********";

fn target_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(skyfare_config::config_path)
}

/// Map a dialoguer failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn require_terminal(action: &str) -> Result<(), CliError> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::NotInteractive {
            action: action.into(),
        })
    }
}

/// TOML rendering of the effective config, secrets masked.
fn render_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("# unable to render config: {e}"))
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&target_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = super::load_config(global)?;
            if cfg.api.api_key.is_some() {
                cfg.api.api_key = Some(MASKED.into());
            }
            let out = output::render_single(global.output, &cfg, render_toml, |c| {
                c.api.base_url.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => init(global),

        ConfigCommand::SetKey => {
            require_terminal("config set-key")?;
            let key = Password::new()
                .with_prompt("API key")
                .interact()
                .map_err(prompt_err)?;
            if key.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "api_key".into(),
                    reason: "API key cannot be empty".into(),
                });
            }
            skyfare_config::store_api_key(key.trim())?;
            eprintln!("✓ API key stored in system keyring");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    require_terminal("config init")?;

    let path = target_path(global);
    eprintln!("✈ skyfare configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    if path.exists()
        && !Confirm::new()
            .with_prompt("A config file already exists. Overwrite it?")
            .default(false)
            .interact()
            .map_err(prompt_err)?
    {
        eprintln!("   Left unchanged.");
        return Ok(());
    }

    let mut cfg = Config::default();

    cfg.api.base_url = Input::new()
        .with_prompt("Location service URL")
        .default(cfg.api.base_url.clone())
        .validate_with(|s: &String| -> Result<(), String> {
            s.parse::<url::Url>()
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    cfg.api.timeout = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(cfg.api.timeout)
        .interact_text()
        .map_err(prompt_err)?;

    let mut cabins: Vec<&str> = vec!["(none)"];
    cabins.extend(CabinClass::ALL.iter().map(|c| c.label()));
    let choice = Select::new()
        .with_prompt("Default cabin class")
        .items(&cabins)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.search.default_cabin = choice
        .checked_sub(1)
        .and_then(|i| CabinClass::ALL.get(i).copied());

    let want_key = Confirm::new()
        .with_prompt("Store an API key in the system keyring?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    if want_key {
        let key = Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(prompt_err)?;
        skyfare_config::store_api_key(key.trim())?;
        eprintln!("   ✓ API key stored in system keyring");
    }

    skyfare_config::save_config_to(&cfg, &path)?;
    eprintln!("   ✓ Wrote {}", path.display());
    Ok(())
}
