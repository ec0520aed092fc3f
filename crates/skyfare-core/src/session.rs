// ── Session facade ──
//
// One handle per running UI. Owns the store and wires the autocomplete
// flow and search backend to it; cheap to clone.

use std::sync::Arc;

use skyfare_api::transport::{TlsMode, TransportConfig};
use skyfare_api::LocationsClient;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::autocomplete::{Autocomplete, LocationSource};
use crate::config::{SessionConfig, TlsVerification};
use crate::error::CoreError;
use crate::event::SessionEvent;
use crate::form::SearchForm;
use crate::model::SearchParams;
use crate::results::ResultsView;
use crate::search::{SearchBackend, StubSearch};
use crate::store::AppStore;

const EVENT_CHANNEL_SIZE: usize = 64;

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    store: Arc<AppStore>,
    autocomplete: Arc<Autocomplete>,
    backend: Arc<dyn SearchBackend>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Build a session talking to the configured location service, with
    /// the stand-in search answering from `config.offers`.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = LocationsClient::new(config.api_url.as_str(), &transport)?;
        let backend = StubSearch::new(config.search_delay, config.offers.clone());
        info!(api_url = %config.api_url, "session created");
        Ok(Self::with_backends(config, Arc::new(client), Arc::new(backend)))
    }

    /// Build a session from explicit backends.
    pub fn with_backends(
        config: SessionConfig,
        source: Arc<dyn LocationSource>,
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        let params = SearchParams {
            flight_class: config.default_cabin,
            ..SearchParams::default()
        };
        let store = Arc::new(AppStore::with_params(params));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let autocomplete = Arc::new(Autocomplete::new(
            Arc::clone(&store),
            source,
            config.min_keyword_len,
            event_tx.clone(),
        ));

        Self {
            inner: Arc::new(SessionInner {
                config,
                store,
                autocomplete,
                backend,
                event_tx,
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.inner.store
    }

    pub fn autocomplete(&self) -> &Arc<Autocomplete> {
        &self.inner.autocomplete
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.event_tx.subscribe()
    }

    /// A fresh search form bound to this session's store.
    pub fn search_form(&self) -> SearchForm {
        SearchForm::new(Arc::clone(&self.inner.autocomplete))
    }

    pub fn results_view(&self) -> ResultsView {
        ResultsView::new(Arc::clone(&self.inner.store))
    }

    /// Run a flight search and publish its offers.
    ///
    /// On success the offers replace the store's list and any previous
    /// selection is cleared. Returns the number of offers.
    pub async fn search(&self, params: SearchParams) -> Result<usize, CoreError> {
        match self.inner.backend.search(&params).await {
            Ok(offers) => {
                let count = offers.len();
                self.inner.store.set_flight_offers(offers);
                self.inner.store.set_selected_offer(None);
                info!(count, "search completed");
                let _ = self
                    .inner
                    .event_tx
                    .send(SessionEvent::SearchCompleted { count });
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                let _ = self.inner.event_tx.send(SessionEvent::SearchFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

fn build_transport(config: &SessionConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
        api_key: config.api_key.clone(),
    }
}
