// ── Results view ──
//
// List state for the results screen. The sort selector only changes which
// label is highlighted: offers are shown in the order the backend returned
// them.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::model::{FlightOffer, LocationField};
use crate::present::{format_date, price};
use crate::store::AppStore;

pub const TRY_ANOTHER_SEARCH: &str = "Try Another Search";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Stops,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Price, SortKey::Duration, SortKey::Stops];

    pub fn next(self) -> Self {
        match self {
            Self::Price => Self::Duration,
            Self::Duration => Self::Stops,
            Self::Stops => Self::Price,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Price => "Price",
            Self::Duration => "Duration",
            Self::Stops => "Stops",
        })
    }
}

/// Header lines echoing the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsHeader {
    /// `"JFK → CDG"`.
    pub route: String,
    /// `"Thu, May 1 | Economy | 2 passengers"`.
    pub details: String,
}

/// What the screen shows when there are no offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub action: &'static str,
}

/// Bottom panel for the highlighted offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferPreview {
    pub airline: String,
    pub price: String,
    pub departure: String,
    pub arrival: String,
}

pub struct ResultsView {
    store: Arc<AppStore>,
    sort: SortKey,
    cursor: usize,
}

impl ResultsView {
    pub fn new(store: Arc<AppStore>) -> Self {
        Self {
            store,
            sort: SortKey::Price,
            cursor: 0,
        }
    }

    pub fn offers(&self) -> Arc<Vec<FlightOffer>> {
        self.store.flight_offers()
    }

    // ── Sort label ───────────────────────────────────────────────────

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    /// The first offer carries the cheapest badge while sorting by price.
    pub fn is_cheapest(&self, index: usize) -> bool {
        index == 0 && self.sort == SortKey::Price && self.store.offer_count() > 0
    }

    // ── Cursor ───────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.store.offer_count().saturating_sub(1))
    }

    pub fn next(&mut self) {
        let len = self.store.offer_count();
        if len > 0 {
            self.cursor = (self.cursor() + 1).min(len - 1);
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor().saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.sort = SortKey::Price;
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Store the offer at `index` as selected. Returns it, or `None` if the
    /// index is out of range (selection is left untouched).
    pub fn select(&mut self, index: usize) -> Option<FlightOffer> {
        let offer = self.store.flight_offers().get(index).cloned()?;
        self.cursor = index;
        self.store.set_selected_offer(Some(offer.clone()));
        debug!(index, "offer selected");
        Some(offer)
    }

    pub fn select_highlighted(&mut self) -> Option<FlightOffer> {
        self.select(self.cursor())
    }

    // ── Text ─────────────────────────────────────────────────────────

    pub fn header(&self) -> ResultsHeader {
        let params = self.store.search_params();
        let from = params.from.as_deref().unwrap_or("-");
        let to = params.to.as_deref().unwrap_or("-");
        let date = params
            .departure_date
            .map_or_else(|| "-".to_owned(), format_date);
        let class = params.flight_class.map_or("-", |c| c.label());

        ResultsHeader {
            route: format!("{from} → {to}"),
            details: format!(
                "{date} | {class} | {} passengers",
                params.total_passengers()
            ),
        }
    }

    /// `"3 flights found"`.
    pub fn count_line(&self) -> String {
        let count = self.store.offer_count();
        if count == 1 {
            "1 flight found".to_owned()
        } else {
            format!("{count} flights found")
        }
    }

    /// Empty-state text, echoing what the user typed.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.store.offer_count() > 0 {
            return None;
        }
        let date = self
            .store
            .search_params()
            .departure_date
            .map_or_else(|| "-".to_owned(), format_date);
        Some(EmptyState {
            message: format!(
                "No flights found for {} to {} on {date}",
                self.store.input(LocationField::Origin),
                self.store.input(LocationField::Destination),
            ),
            action: TRY_ANOTHER_SEARCH,
        })
    }

    pub fn preview(&self, index: usize) -> Option<OfferPreview> {
        let offers = self.store.flight_offers();
        let offer = offers.get(index)?;
        let trip = offer.trips.first()?;
        let first = trip.first_leg()?;
        let last = trip.last_leg()?;

        Some(OfferPreview {
            airline: first.carrier_name.clone(),
            price: price(&offer.currency_code, &offer.total_price),
            departure: format!(
                "{} at {}",
                first.departure_airport,
                first.departure_date_time.format("%b %-d, %H:%M")
            ),
            arrival: format!(
                "{} at {}",
                last.arrival_airport,
                last.arrival_date_time.format("%b %-d, %H:%M")
            ),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::CabinClass;
    use crate::model::offer::tests::sample_offer;

    fn view_with(offers: Vec<FlightOffer>) -> ResultsView {
        let store = Arc::new(AppStore::new());
        store.set_flight_offers(offers);
        ResultsView::new(store)
    }

    fn cheaper(mut offer: FlightOffer, total: &str) -> FlightOffer {
        offer.total_price = total.into();
        offer
    }

    #[test]
    fn sort_changes_label_not_order() {
        let offers = vec![
            cheaper(sample_offer(), "900"),
            cheaper(sample_offer(), "100"),
        ];
        let mut view = view_with(offers);

        for key in SortKey::ALL {
            view.set_sort(key);
            let shown = view.offers();
            assert_eq!(shown[0].total_price, "900");
            assert_eq!(shown[1].total_price, "100");
        }
        view.cycle_sort();
        assert_eq!(view.sort_key(), SortKey::Price);
    }

    #[test]
    fn cheapest_badge_only_under_price_sort() {
        let mut view = view_with(vec![sample_offer(), sample_offer()]);
        assert!(view.is_cheapest(0));
        assert!(!view.is_cheapest(1));
        view.set_sort(SortKey::Stops);
        assert!(!view.is_cheapest(0));
    }

    #[test]
    fn selecting_stores_offer() {
        let mut view = view_with(vec![sample_offer(), cheaper(sample_offer(), "1")]);
        view.next();
        let chosen = view.select_highlighted().unwrap();
        assert_eq!(chosen.total_price, "1");
        assert_eq!(view.store.selected_offer().unwrap().total_price, "1");

        assert!(view.select(9).is_none());
        assert_eq!(view.store.selected_offer().unwrap().total_price, "1");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut view = view_with(vec![sample_offer()]);
        view.next();
        view.next();
        assert_eq!(view.cursor(), 0);
        view.previous();
        assert_eq!(view.cursor(), 0);

        let mut empty = view_with(Vec::new());
        empty.next();
        assert_eq!(empty.cursor(), 0);
        assert!(empty.select_highlighted().is_none());
    }

    #[test]
    fn header_echoes_search() {
        let view = view_with(vec![sample_offer()]);
        view.store.update_search_params(|p| {
            p.from = Some("JFK".into());
            p.to = Some("CDG".into());
            p.departure_date = NaiveDate::from_ymd_opt(2025, 5, 1);
            p.flight_class = Some(CabinClass::PremiumEconomy);
            p.children = 1;
        });

        let header = view.header();
        assert_eq!(header.route, "JFK → CDG");
        assert_eq!(header.details, "Thu, May 1 | Premium Economy | 2 passengers");
        assert_eq!(view.count_line(), "1 flight found");
        assert!(view.empty_state().is_none());
    }

    #[test]
    fn empty_state_echoes_inputs() {
        let view = view_with(Vec::new());
        view.store.set_input(LocationField::Origin, "New York - JFK");
        view.store.set_input(LocationField::Destination, "Paris - PAR");
        view.store
            .update_search_params(|p| p.departure_date = NaiveDate::from_ymd_opt(2025, 5, 1));

        let empty = view.empty_state().unwrap();
        assert_eq!(
            empty.message,
            "No flights found for New York - JFK to Paris - PAR on Thu, May 1"
        );
        assert_eq!(empty.action, "Try Another Search");
        assert_eq!(view.count_line(), "0 flights found");
    }

    #[test]
    fn preview_uses_first_trip_endpoints() {
        let view = view_with(vec![sample_offer()]);
        let preview = view.preview(0).unwrap();
        assert_eq!(preview.airline, "Air France");
        assert_eq!(preview.price, "EUR 412.30");
        assert_eq!(preview.departure, "JFK at May 1, 18:30");
        assert_eq!(preview.arrival, "CDG at May 2, 07:50");
        assert!(view.preview(1).is_none());
    }
}
