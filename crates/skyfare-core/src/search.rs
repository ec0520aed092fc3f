// ── Flight search backend ──
//
// There is no live flight search API; `StubSearch` stands in for one by
// waiting a fixed delay and answering with a configured offer list.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{FlightOffer, SearchParams};

/// Delay before the stand-in search answers.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1500);

pub trait SearchBackend: Send + Sync {
    fn search(&self, params: &SearchParams) -> BoxFuture<'_, Result<Vec<FlightOffer>, CoreError>>;
}

/// Fixed-delay stand-in for a real flight search.
#[derive(Debug, Clone)]
pub struct StubSearch {
    delay: Duration,
    offers: Arc<Vec<FlightOffer>>,
}

impl Default for StubSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY, Vec::new())
    }
}

impl StubSearch {
    pub fn new(delay: Duration, offers: Vec<FlightOffer>) -> Self {
        Self {
            delay,
            offers: Arc::new(offers),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl SearchBackend for StubSearch {
    fn search(&self, params: &SearchParams) -> BoxFuture<'_, Result<Vec<FlightOffer>, CoreError>> {
        debug!(
            from = ?params.from,
            to = ?params.to,
            delay_ms = self.delay.as_millis(),
            "running stub search"
        );
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Ok(self.offers.as_ref().clone())
        })
    }
}
