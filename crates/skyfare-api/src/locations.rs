// Async client for the location-suggestion endpoint.
//
// Base URL: whatever prefix the backend is mounted under (e.g.
// `http://localhost:8080/api`). Requests go to `{base}/locations/search`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::models::LocationSearchResponse;
use crate::transport::TransportConfig;

/// Async client for `GET /locations/search?keyword=`.
#[derive(Debug, Clone)]
pub struct LocationsClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl LocationsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: Some(transport.timeout),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and timeouts).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: None,
        })
    }

    /// Ensure the base path ends with `/` so relative joins append to it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Search locations matching `keyword`.
    ///
    /// The keyword is sent as-is (percent-encoded). Length policy belongs
    /// to the caller.
    pub async fn search_locations(&self, keyword: &str) -> Result<LocationSearchResponse, Error> {
        let mut url = self.base_url.join("locations/search")?;
        url.query_pairs_mut().append_pair("keyword", keyword);
        self.get(url).await
    }

    // ── HTTP helpers ─────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.handle_response(resp).await
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        match self.timeout {
            Some(timeout) if err.is_timeout() => Error::Timeout {
                timeout_secs: timeout.as_secs(),
            },
            _ => Error::Transport(err),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("server rejected credentials ({status})"),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
