// ── Flight offers ──
//
// Shape of the offers the search backend returns (camelCase JSON).
// Prices and flight numbers may arrive as strings or numbers and are
// kept as the backend formatted them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use skyfare_api::de::{opt_string_or_number, string_or_number};

/// Direction marker on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripDirection {
    OneWay,
    Return,
}

/// A priced, bookable combination of one or more trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub currency_code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub total_price: String,
    #[serde(deserialize_with = "string_or_number")]
    pub base_price: String,
    #[serde(default)]
    pub total_travelers: u32,
    pub trips: Vec<Trip>,
}

/// One directional itinerary (outbound or return).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub trip_no: u32,
    pub from: String,
    pub to: String,
    pub trip_type: TripDirection,
    #[serde(default)]
    pub stops: u32,
    pub total_flight_duration: String,
    #[serde(default)]
    pub total_layover_duration: Option<String>,
    pub legs: Vec<Leg>,
}

/// One non-stop segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub leg_no: u32,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date_time: NaiveDateTime,
    pub arrival_date_time: NaiveDateTime,
    pub carrier_code: String,
    pub carrier_name: String,
    #[serde(default)]
    pub operating_carrier_code: Option<String>,
    #[serde(default)]
    pub operating_carrier_name: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub flight_number: String,
    pub aircraft_code: String,
    pub duration: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub layover_after: Option<String>,
}

impl FlightOffer {
    /// First leg of the first trip, if any.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.trips.first().and_then(|t| t.legs.first())
    }
}

impl Trip {
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    pub fn last_leg(&self) -> Option<&Leg> {
        self.legs.last()
    }
}
