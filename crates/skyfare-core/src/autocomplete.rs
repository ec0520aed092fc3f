// ── Location autocomplete ──
//
// Text changes are handled synchronously (store updates plus an optional
// ticket); the network call happens in `lookup`, which callers usually
// spawn. Every change bumps the field's generation, and a response is
// applied only if its ticket still carries the current generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::BoxFuture;
use skyfare_api::{LocationSearchResponse, LocationsClient};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::convert::flatten_locations;
use crate::error::CoreError;
use crate::event::{LOOKUP_FAILED_ALERT, SessionEvent};
use crate::model::{LocationField, LocationSuggestion};
use crate::store::AppStore;

/// Minimum keyword length (in characters) before a lookup is issued.
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;

// ── LocationSource ───────────────────────────────────────────────

/// Anything that can answer a keyword with grouped locations.
pub trait LocationSource: Send + Sync {
    fn search(&self, keyword: &str) -> BoxFuture<'_, Result<LocationSearchResponse, CoreError>>;
}

impl LocationSource for LocationsClient {
    fn search(&self, keyword: &str) -> BoxFuture<'_, Result<LocationSearchResponse, CoreError>> {
        let keyword = keyword.to_owned();
        Box::pin(async move {
            self.search_locations(&keyword)
                .await
                .map_err(CoreError::from)
        })
    }
}

// ── Tickets and outcomes ─────────────────────────────────────────

/// A pending lookup, issued by [`Autocomplete::input_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    field: LocationField,
    keyword: String,
    generation: u64,
}

impl LookupTicket {
    pub fn field(&self) -> LocationField {
        self.field
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub enum LookupOutcome {
    /// Suggestions were stored for the field.
    Applied { count: usize },
    /// A newer input arrived while the request was in flight; nothing changed.
    Superseded,
    /// The request failed; the field's list was emptied and an alert emitted.
    Failed(CoreError),
}

// ── Autocomplete ─────────────────────────────────────────────────

pub struct Autocomplete {
    store: Arc<AppStore>,
    source: Arc<dyn LocationSource>,
    min_keyword_len: usize,
    origin_generation: AtomicU64,
    destination_generation: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
}

impl Autocomplete {
    pub fn new(
        store: Arc<AppStore>,
        source: Arc<dyn LocationSource>,
        min_keyword_len: usize,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            store,
            source,
            min_keyword_len,
            origin_generation: AtomicU64::new(0),
            destination_generation: AtomicU64::new(0),
            events,
        }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn min_keyword_len(&self) -> usize {
        self.min_keyword_len
    }

    fn generation(&self, field: LocationField) -> &AtomicU64 {
        match field {
            LocationField::Origin => &self.origin_generation,
            LocationField::Destination => &self.destination_generation,
        }
    }

    /// Invalidate any in-flight lookup for `field`. Returns the new generation.
    pub fn invalidate(&self, field: LocationField) -> u64 {
        self.generation(field).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.generation(ticket.field).load(Ordering::SeqCst) == ticket.generation
    }

    /// Record new input text for `field`.
    ///
    /// - Empty text clears the input, suggestions, loading flag and the
    ///   field's code.
    /// - Text shorter than the minimum is stored but issues no request;
    ///   earlier suggestions stay visible.
    /// - Otherwise the loading flag is raised and a ticket is returned for
    ///   [`lookup`](Self::lookup).
    pub fn input_changed(&self, field: LocationField, text: &str) -> Option<LookupTicket> {
        let generation = self.invalidate(field);

        if text.is_empty() {
            self.store.set_input(field, String::new());
            self.store.set_suggestions(field, Vec::new());
            self.store.set_loading(field, false);
            self.store.update_search_params(|p| p.set_code(field, None));
            return None;
        }

        self.store.set_input(field, text);

        if text.chars().count() < self.min_keyword_len {
            self.store.set_loading(field, false);
            return None;
        }

        self.store.set_loading(field, true);
        Some(LookupTicket {
            field,
            keyword: text.to_owned(),
            generation,
        })
    }

    /// Run the lookup described by `ticket` and apply its result.
    pub async fn lookup(&self, ticket: LookupTicket) -> LookupOutcome {
        debug!(field = %ticket.field, keyword = %ticket.keyword, "fetching location suggestions");

        let result = self.source.search(&ticket.keyword).await;

        if !self.is_current(&ticket) {
            debug!(field = %ticket.field, keyword = %ticket.keyword, "dropping superseded suggestions");
            return LookupOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                let suggestions = flatten_locations(&response);
                let count = suggestions.len();
                self.store.set_suggestions(ticket.field, suggestions);
                self.store.set_loading(ticket.field, false);
                debug!(field = %ticket.field, count, "suggestions applied");
                LookupOutcome::Applied { count }
            }
            Err(e) => {
                warn!(field = %ticket.field, error = %e, "location lookup failed");
                self.store.set_suggestions(ticket.field, Vec::new());
                self.store.set_loading(ticket.field, false);
                let _ = self.events.send(SessionEvent::LookupFailed {
                    field: ticket.field,
                    message: LOOKUP_FAILED_ALERT.to_owned(),
                });
                LookupOutcome::Failed(e)
            }
        }
    }

    /// Convenience for callers that don't need to spawn: record the text
    /// and, if a ticket was issued, run the lookup inline.
    pub async fn update(&self, field: LocationField, text: &str) -> Option<LookupOutcome> {
        let ticket = self.input_changed(field, text)?;
        Some(self.lookup(ticket).await)
    }

    /// Commit a suggestion to `field`.
    ///
    /// Sets only this field's code, rewrites its input to `"name - iata"`
    /// and closes the dropdown. In-flight lookups for the field are
    /// invalidated so they cannot reopen it.
    pub fn select(&self, field: LocationField, suggestion: &LocationSuggestion) {
        self.invalidate(field);
        let code = suggestion.iata.clone();
        self.store
            .update_search_params(|p| p.set_code(field, Some(code)));
        self.store.set_input(field, suggestion.display_text());
        self.store.set_suggestions(field, Vec::new());
        self.store.set_loading(field, false);
        debug!(field = %field, iata = %suggestion.iata, "suggestion selected");
    }

    /// Close the field's suggestion list without selecting anything.
    /// The typed text and the field's code are kept.
    pub fn dismiss(&self, field: LocationField) {
        self.invalidate(field);
        self.store.set_suggestions(field, Vec::new());
        self.store.set_loading(field, false);
    }

    /// Swap origin and destination, discarding in-flight lookups for both.
    pub fn swap(&self) {
        self.invalidate(LocationField::Origin);
        self.invalidate(LocationField::Destination);
        self.store.swap_locations();
    }
}
