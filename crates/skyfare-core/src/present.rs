// ── Card and detail presentation ──
//
// Pure functions from a `FlightOffer` to display strings. Renderers decide
// layout; these decide wording.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{FlightOffer, Leg, Trip, TripDirection};

pub const BOOK_LABEL: &str = "Book";
pub const CONTINUE_LABEL: &str = "Continue to Booking";

// ── Formatting helpers ───────────────────────────────────────────

/// `"Thu, May 1"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// `"18:30"`.
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Card wording: only counts above one are plural (`"0 Stop"`, `"2 Stops"`).
pub fn card_stops_label(stops: u32) -> String {
    if stops > 1 {
        format!("{stops} Stops")
    } else {
        format!("{stops} Stop")
    }
}

/// Detail wording: `"0 Stops"`, `"1 Stop"`, `"2 Stops"`.
pub fn stops_label(stops: u32) -> String {
    if stops == 1 {
        "1 Stop".to_owned()
    } else {
        format!("{stops} Stops")
    }
}

pub fn price(currency: &str, amount: &str) -> String {
    format!("{currency} {amount}")
}

/// The second trip of an offer is marked when it is a return trip.
pub fn is_return_trip(trip: &Trip, index: usize) -> bool {
    index == 1 && trip.trip_type == TripDirection::Return
}

// ── Card ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSummary {
    /// `"{carrierName} ({aircraftCode})"` of the first leg.
    pub carrier: String,
    /// `"Layover {total}"` or `"Non-Stop"`.
    pub subtitle: String,
    pub is_return: bool,
    pub departure_airport: String,
    pub departure_time: String,
    pub departure_date: String,
    pub arrival_airport: String,
    pub arrival_time: String,
    pub arrival_date: String,
    pub duration: String,
    pub stops: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub trips: Vec<TripSummary>,
    /// `"{cur} {total}"`.
    pub price: String,
    /// `"Base: {cur} {base}"`.
    pub base_price: String,
}

pub fn trip_summary(trip: &Trip, index: usize) -> TripSummary {
    let first = trip.first_leg();
    let last = trip.last_leg();

    let subtitle = if trip.stops > 0 {
        format!(
            "Layover {}",
            trip.total_layover_duration.as_deref().unwrap_or("-")
        )
    } else {
        "Non-Stop".to_owned()
    };

    TripSummary {
        carrier: first.map_or_else(String::new, |l| {
            format!("{} ({})", l.carrier_name, l.aircraft_code)
        }),
        subtitle,
        is_return: is_return_trip(trip, index),
        departure_airport: first.map_or_else(|| trip.from.clone(), |l| l.departure_airport.clone()),
        departure_time: first.map(|l| format_time(l.departure_date_time)).unwrap_or_default(),
        departure_date: first
            .map(|l| format_date(l.departure_date_time.date()))
            .unwrap_or_default(),
        arrival_airport: last.map_or_else(|| trip.to.clone(), |l| l.arrival_airport.clone()),
        arrival_time: last.map(|l| format_time(l.arrival_date_time)).unwrap_or_default(),
        arrival_date: last
            .map(|l| format_date(l.arrival_date_time.date()))
            .unwrap_or_default(),
        duration: trip.total_flight_duration.clone(),
        stops: card_stops_label(trip.stops),
    }
}

pub fn card_summary(offer: &FlightOffer) -> CardSummary {
    CardSummary {
        trips: offer
            .trips
            .iter()
            .enumerate()
            .map(|(i, t)| trip_summary(t, i))
            .collect(),
        price: price(&offer.currency_code, &offer.total_price),
        base_price: format!("Base: {}", price(&offer.currency_code, &offer.base_price)),
    }
}

// ── Detail ───────────────────────────────────────────────────────

/// Rows of the price summary block.
pub fn price_summary(offer: &FlightOffer) -> Vec<(&'static str, String)> {
    vec![
        ("Total", price(&offer.currency_code, &offer.total_price)),
        ("Base Fare", price(&offer.currency_code, &offer.base_price)),
        ("Travelers", offer.total_travelers.to_string()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPanel {
    /// `"{from} → {to}"`.
    pub title: String,
    pub is_return: bool,
    pub stops: String,
    pub duration: String,
    /// `"Layover: {total}"`, only for trips with stops.
    pub layover: Option<String>,
}

pub fn trip_panel(trip: &Trip, index: usize) -> TripPanel {
    TripPanel {
        title: format!("{} → {}", trip.from, trip.to),
        is_return: is_return_trip(trip, index),
        stops: stops_label(trip.stops),
        duration: trip.total_flight_duration.clone(),
        layover: (trip.stops != 0).then(|| {
            format!(
                "Layover: {}",
                trip.total_layover_duration.as_deref().unwrap_or("-")
            )
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegLines {
    /// `"JFK (18:30) → CDG (07:50)"`.
    pub route: String,
    /// `"Flight AF 7 (77W)"`.
    pub flight: String,
    pub operated_by: Option<String>,
    /// `"Duration: 7h 20m"`.
    pub duration: String,
    pub layover: Option<String>,
}

pub fn leg_lines(leg: &Leg) -> LegLines {
    LegLines {
        route: format!(
            "{} ({}) → {} ({})",
            leg.departure_airport,
            format_time(leg.departure_date_time),
            leg.arrival_airport,
            format_time(leg.arrival_date_time),
        ),
        flight: format!(
            "Flight {} {} ({})",
            leg.carrier_code, leg.flight_number, leg.aircraft_code
        ),
        operated_by: leg
            .operating_carrier_name
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("Operated by {name}")),
        duration: format!("Duration: {}", leg.duration),
        layover: leg
            .layover_after
            .as_ref()
            .map(|l| format!("Layover: {l}")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::offer::tests::sample_offer;

    #[test]
    fn stop_labels() {
        assert_eq!(stops_label(0), "0 Stops");
        assert_eq!(stops_label(1), "1 Stop");
        assert_eq!(stops_label(2), "2 Stops");

        assert_eq!(card_stops_label(0), "0 Stop");
        assert_eq!(card_stops_label(1), "1 Stop");
        assert_eq!(card_stops_label(2), "2 Stops");
    }

    #[test]
    fn card_for_round_trip() {
        let card = card_summary(&sample_offer());

        assert_eq!(card.price, "EUR 412.30");
        assert_eq!(card.base_price, "Base: EUR 350");

        let outbound = &card.trips[0];
        assert_snapshot!(outbound.carrier, @"Air France (77W)");
        assert_eq!(outbound.subtitle, "Non-Stop");
        assert!(!outbound.is_return);
        assert_eq!(outbound.departure_time, "18:30");
        assert_eq!(outbound.departure_date, "Thu, May 1");
        assert_eq!(outbound.arrival_date, "Fri, May 2");
        assert_eq!(outbound.stops, "0 Stop");

        let inbound = &card.trips[1];
        assert_eq!(inbound.subtitle, "Layover 1h 40m");
        assert!(inbound.is_return);
        assert_eq!(inbound.stops, "1 Stop");
        assert_eq!(inbound.arrival_airport, "JFK");
    }

    #[test]
    fn return_marker_needs_second_position() {
        let offer = sample_offer();
        assert!(!is_return_trip(&offer.trips[1], 0));
        assert!(!is_return_trip(&offer.trips[0], 1));
    }

    #[test]
    fn price_summary_rows() {
        let rows = price_summary(&sample_offer());
        assert_eq!(
            rows,
            vec![
                ("Total", "EUR 412.30".to_string()),
                ("Base Fare", "EUR 350".to_string()),
                ("Travelers", "2".to_string()),
            ]
        );
    }

    #[test]
    fn trip_panels() {
        let offer = sample_offer();
        let outbound = trip_panel(&offer.trips[0], 0);
        assert_snapshot!(outbound.title, @"JFK → CDG");
        assert_eq!(outbound.stops, "0 Stops");
        assert_eq!(outbound.layover, None);

        let inbound = trip_panel(&offer.trips[1], 1);
        assert!(inbound.is_return);
        assert_eq!(inbound.duration, "10h 5m");
        assert_eq!(inbound.layover.as_deref(), Some("Layover: 1h 40m"));
    }

    #[test]
    fn leg_rows() {
        let offer = sample_offer();
        let first = leg_lines(&offer.trips[1].legs[0]);
        assert_snapshot!(first.route, @"CDG (09:15) → DUB (10:00)");
        assert_eq!(first.flight, "Flight EI 521 (320)");
        assert_eq!(first.operated_by.as_deref(), Some("Operated by Aer Lingus Regional"));
        assert_eq!(first.duration, "Duration: 1h 45m");
        assert_eq!(first.layover.as_deref(), Some("Layover: 1h 40m"));

        let second = leg_lines(&offer.trips[1].legs[1]);
        assert_eq!(second.operated_by, None);
        assert_eq!(second.layover, None);
    }
}
