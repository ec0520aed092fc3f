//! Shared configuration for the skyfare CLI and TUI.
//!
//! TOML file + `SKYFARE_` environment overrides, API-key resolution
//! (env, keyring, plaintext), the offers fixture used by the stand-in
//! search, and translation to `skyfare_core::SessionConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use skyfare_core::{CabinClass, FlightOffer, SessionConfig, TlsVerification};

const KEYRING_SERVICE: &str = "skyfare";
const KEYRING_USER: &str = "api-key";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to read offers fixture {path}: {reason}")]
    Fixture { path: PathBuf, reason: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub defaults: Defaults,
}

/// How to reach the location service.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL the service is mounted under.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// API key (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Consult the OS keyring for the API key.
    #[serde(default = "default_true")]
    pub keyring: bool,

    /// Path to a custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates (local development only).
    #[serde(default)]
    pub insecure: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            api_key: None,
            api_key_env: default_api_key_env(),
            keyring: true,
            ca_cert: None,
            insecure: false,
        }
    }
}

/// Search-flow tuning.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Characters required before a suggestion lookup.
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,

    /// Stand-in search delay, humantime syntax ("1500ms", "2s").
    #[serde(default = "default_stub_delay")]
    pub stub_delay: String,

    /// Cabin class preselected on the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cabin: Option<CabinClass>,

    /// JSON array of offers returned by the stand-in search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offers_fixture: Option<PathBuf>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_keyword_len: default_min_keyword_len(),
            stub_delay: default_stub_delay(),
            default_cabin: None,
            offers_fixture: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_api_key_env() -> Option<String> {
    Some("SKYFARE_API_KEY".into())
}
fn default_true() -> bool {
    true
}
fn default_min_keyword_len() -> usize {
    3
}
fn default_stub_delay() -> String {
    "1500ms".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "skyfare", "skyfare").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("skyfare");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file (missing files are fine) + environment.
///
/// Environment variables use the `SKYFARE_` prefix with `__` between
/// levels: `SKYFARE_API__BASE_URL`, `SKYFARE_SEARCH__STUB_DELAY`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SKYFARE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key: env var → keyring → plaintext. The key is optional.
pub fn resolve_api_key(api: &ApiSettings) -> Option<SecretString> {
    // 1. Configured env var
    if let Some(ref env_name) = api.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            if !val.is_empty() {
                return Some(SecretString::from(val));
            }
        }
    }

    // 2. System keyring
    if api.keyring {
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            if let Ok(secret) = entry.get_password() {
                return Some(SecretString::from(secret));
            }
        }
    }

    // 3. Plaintext in config
    api.api_key.clone().map(SecretString::from)
}

/// Store the API key in the OS keyring.
pub fn store_api_key(key: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    entry.set_password(key)?;
    Ok(())
}

// ── Offers fixture ──────────────────────────────────────────────────

/// Read a JSON array of offers (camelCase) from disk.
pub fn load_offers(path: &Path) -> Result<Vec<FlightOffer>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Fixture {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Fixture {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse a humantime duration such as `"1500ms"` or `"2s"`.
pub fn parse_delay(raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::Validation {
        field: "search.stub_delay".into(),
        reason: e.to_string(),
    })
}

/// Build a `SessionConfig`, resolving the API key and loading the
/// offers fixture if one is configured.
pub fn to_session_config(cfg: &Config) -> Result<SessionConfig, ConfigError> {
    let api_url: url::Url = cfg
        .api
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("invalid URL: {}", cfg.api.base_url),
        })?;

    if cfg.search.min_keyword_len == 0 {
        return Err(ConfigError::Validation {
            field: "search.min_keyword_len".into(),
            reason: "must be at least 1".into(),
        });
    }

    let tls = if cfg.api.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = cfg.api.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let offers = match cfg.search.offers_fixture {
        Some(ref path) => load_offers(path)?,
        None => Vec::new(),
    };

    let mut session = SessionConfig::new(api_url);
    session.api_key = resolve_api_key(&cfg.api);
    session.tls = tls;
    session.timeout = Duration::from_secs(cfg.api.timeout);
    session.min_keyword_len = cfg.search.min_keyword_len;
    session.search_delay = parse_delay(&cfg.search.stub_delay)?;
    session.default_cabin = cfg.search.default_cabin;
    session.offers = offers;
    Ok(session)
}
