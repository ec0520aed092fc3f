// ── Runtime session configuration ──
//
// Describes how to reach the location service and how the search flow
// behaves. Never touches disk; the CLI/TUI build a `SessionConfig` (usually
// via skyfare-config) and hand it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::autocomplete::DEFAULT_MIN_KEYWORD_LEN;
use crate::model::{CabinClass, FlightOffer};
use crate::search::DEFAULT_SEARCH_DELAY;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development servers).
    DangerAcceptInvalid,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the location service, e.g. `http://localhost:8080/api`.
    pub api_url: Url,
    pub api_key: Option<SecretString>,
    pub tls: TlsVerification,
    /// Per-request timeout for suggestion lookups.
    pub timeout: Duration,
    /// Characters required before a lookup is issued.
    pub min_keyword_len: usize,
    /// How long the stand-in search takes to answer.
    pub search_delay: Duration,
    /// Cabin class preselected on a fresh form.
    pub default_cabin: Option<CabinClass>,
    /// Offers returned by the stand-in search.
    pub offers: Vec<FlightOffer>,
}

impl SessionConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            api_key: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            min_keyword_len: DEFAULT_MIN_KEYWORD_LEN,
            search_delay: DEFAULT_SEARCH_DELAY,
            default_cabin: None,
            offers: Vec::new(),
        }
    }
}
