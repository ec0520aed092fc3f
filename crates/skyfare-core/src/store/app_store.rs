// ── AppStore ──
//
// Single owner of the search session's state. Screens hold an
// `Arc<AppStore>`, read through getters and request changes through
// setters; every change is pushed to subscribers right away.

use std::sync::Arc;

use tracing::debug;

use super::slot::Slot;
use crate::model::{CabinClass, FlightOffer, LocationField, LocationSuggestion, SearchParams};
use crate::stream::SlotStream;

/// Per-field autocomplete state.
struct FieldState {
    input: Slot<String>,
    suggestions: Slot<Arc<Vec<LocationSuggestion>>>,
    loading: Slot<bool>,
}

impl FieldState {
    fn new() -> Self {
        Self {
            input: Slot::new(String::new()),
            suggestions: Slot::new(Arc::new(Vec::new())),
            loading: Slot::new(false),
        }
    }
}

/// Injectable state store shared by every screen.
pub struct AppStore {
    search_params: Slot<SearchParams>,
    origin: FieldState,
    destination: FieldState,
    flight_offers: Slot<Arc<Vec<FlightOffer>>>,
    selected_offer: Slot<Option<Arc<FlightOffer>>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    pub fn new() -> Self {
        Self::with_params(SearchParams::default())
    }

    pub fn with_params(params: SearchParams) -> Self {
        Self {
            search_params: Slot::new(params),
            origin: FieldState::new(),
            destination: FieldState::new(),
            flight_offers: Slot::new(Arc::new(Vec::new())),
            selected_offer: Slot::new(None),
        }
    }

    fn field(&self, field: LocationField) -> &FieldState {
        match field {
            LocationField::Origin => &self.origin,
            LocationField::Destination => &self.destination,
        }
    }

    // ── Search parameters ────────────────────────────────────────────

    pub fn search_params(&self) -> SearchParams {
        self.search_params.get()
    }

    pub fn set_search_params(&self, params: SearchParams) {
        self.search_params.set(params);
    }

    /// Mutate the parameters in place, notifying subscribers once.
    pub fn update_search_params(&self, f: impl FnOnce(&mut SearchParams)) {
        self.search_params.update(f);
    }

    /// The enumerated set of valid cabin classes.
    pub fn cabin_classes(&self) -> &'static [CabinClass] {
        &CabinClass::ALL
    }

    // ── Location inputs ──────────────────────────────────────────────

    pub fn input(&self, field: LocationField) -> String {
        self.field(field).input.get()
    }

    pub fn set_input(&self, field: LocationField, text: impl Into<String>) {
        self.field(field).input.set(text.into());
    }

    pub fn suggestions(&self, field: LocationField) -> Arc<Vec<LocationSuggestion>> {
        self.field(field).suggestions.get()
    }

    pub fn set_suggestions(&self, field: LocationField, list: Vec<LocationSuggestion>) {
        self.field(field).suggestions.set(Arc::new(list));
    }

    pub fn is_loading(&self, field: LocationField) -> bool {
        self.field(field).loading.get()
    }

    pub fn set_loading(&self, field: LocationField, loading: bool) {
        self.field(field).loading.set(loading);
    }

    /// Exchange origin and destination text and codes.
    ///
    /// Empty sides swap like any other value. Both suggestion lists and
    /// loading flags are cleared since they belong to the old text.
    pub fn swap_locations(&self) {
        let origin_text = self.origin.input.get();
        let destination_text = self.destination.input.get();
        self.origin.input.set(destination_text);
        self.destination.input.set(origin_text);

        self.search_params
            .update(|p| std::mem::swap(&mut p.from, &mut p.to));

        for field in [LocationField::Origin, LocationField::Destination] {
            let state = self.field(field);
            state.suggestions.set(Arc::new(Vec::new()));
            state.loading.set(false);
        }
        debug!("swapped origin and destination");
    }

    // ── Offers ───────────────────────────────────────────────────────

    pub fn flight_offers(&self) -> Arc<Vec<FlightOffer>> {
        self.flight_offers.get()
    }

    pub fn offer_count(&self) -> usize {
        self.flight_offers.with(|offers| offers.len())
    }

    pub fn set_flight_offers(&self, offers: Vec<FlightOffer>) {
        self.flight_offers.set(Arc::new(offers));
    }

    pub fn selected_offer(&self) -> Option<Arc<FlightOffer>> {
        self.selected_offer.get()
    }

    pub fn set_selected_offer(&self, offer: Option<FlightOffer>) {
        self.selected_offer.set(offer.map(Arc::new));
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_search_params(&self) -> SlotStream<SearchParams> {
        self.search_params.subscribe()
    }

    pub fn subscribe_suggestions(
        &self,
        field: LocationField,
    ) -> SlotStream<Arc<Vec<LocationSuggestion>>> {
        self.field(field).suggestions.subscribe()
    }

    pub fn subscribe_flight_offers(&self) -> SlotStream<Arc<Vec<FlightOffer>>> {
        self.flight_offers.subscribe()
    }

    pub fn subscribe_selected_offer(&self) -> SlotStream<Option<Arc<FlightOffer>>> {
        self.selected_offer.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::SuggestionKind;
    use crate::model::offer::tests::sample_offer;

    fn suggestion(iata: &str) -> LocationSuggestion {
        LocationSuggestion {
            id: iata.to_lowercase(),
            name: format!("{iata} airport"),
            iata: iata.into(),
            kind: SuggestionKind::Airport,
        }
    }

    #[test]
    fn fields_are_independent() {
        let store = AppStore::new();
        store.set_input(LocationField::Origin, "Par");
        store.set_suggestions(LocationField::Origin, vec![suggestion("CDG")]);
        store.set_loading(LocationField::Origin, true);

        assert_eq!(store.input(LocationField::Destination), "");
        assert!(store.suggestions(LocationField::Destination).is_empty());
        assert!(!store.is_loading(LocationField::Destination));
        assert_eq!(store.suggestions(LocationField::Origin).len(), 1);
        assert!(store.is_loading(LocationField::Origin));
    }

    #[test]
    fn swap_exchanges_text_and_codes() {
        let store = AppStore::new();
        store.set_input(LocationField::Origin, "Paris - PAR");
        store.set_input(LocationField::Destination, "Berlin - BER");
        store.update_search_params(|p| {
            p.from = Some("PAR".into());
            p.to = Some("BER".into());
        });
        store.set_suggestions(LocationField::Origin, vec![suggestion("CDG")]);

        store.swap_locations();

        assert_eq!(store.input(LocationField::Origin), "Berlin - BER");
        assert_eq!(store.input(LocationField::Destination), "Paris - PAR");
        let params = store.search_params();
        assert_eq!(params.from.as_deref(), Some("BER"));
        assert_eq!(params.to.as_deref(), Some("PAR"));
        assert!(store.suggestions(LocationField::Origin).is_empty());
    }

    #[test]
    fn swap_with_one_side_empty_loses_nothing() {
        let store = AppStore::new();
        store.set_input(LocationField::Origin, "Paris - PAR");
        store.update_search_params(|p| p.from = Some("PAR".into()));

        store.swap_locations();

        assert_eq!(store.input(LocationField::Origin), "");
        assert_eq!(store.input(LocationField::Destination), "Paris - PAR");
        let params = store.search_params();
        assert_eq!(params.from, None);
        assert_eq!(params.to.as_deref(), Some("PAR"));

        store.swap_locations();
        assert_eq!(store.input(LocationField::Origin), "Paris - PAR");
        assert_eq!(store.search_params().from.as_deref(), Some("PAR"));
    }

    #[test]
    fn cabin_classes_are_enumerated() {
        let store = AppStore::new();
        assert_eq!(store.cabin_classes().len(), 4);
        assert_eq!(store.cabin_classes()[0], CabinClass::Economy);
    }

    #[tokio::test]
    async fn subscribers_see_offer_selection() {
        let store = AppStore::new();
        let mut selected = store.subscribe_selected_offer();
        assert!(selected.current().is_none());

        store.set_selected_offer(Some(sample_offer()));
        let latest = selected.changed().await.unwrap().unwrap();
        assert_eq!(latest.currency_code, "EUR");
    }

    #[tokio::test]
    async fn param_updates_are_pushed() {
        let store = AppStore::new();
        let mut params = store.subscribe_search_params();
        store.update_search_params(|p| p.adults = 3);
        assert_eq!(params.changed().await.unwrap().adults, 3);
    }
}
