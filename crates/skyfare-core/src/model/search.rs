// ── Search parameters and form-level enums ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Cabin class accepted by the search backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// Every valid cabin class, in display order.
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Economy,
        CabinClass::PremiumEconomy,
        CabinClass::Business,
        CabinClass::First,
    ];

    /// Human-readable label ("Premium Economy").
    pub fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::PremiumEconomy => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First",
        }
    }
}

/// Trip type selected on the search form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    #[strum(to_string = "Round Trip")]
    RoundTrip,
    #[strum(to_string = "One Way")]
    OneWay,
    #[strum(to_string = "Multi City")]
    MultiCity,
}

/// Which of the two location inputs an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum LocationField {
    #[strum(to_string = "origin")]
    Origin,
    #[strum(to_string = "destination")]
    Destination,
}

impl LocationField {
    /// The opposite field.
    pub fn other(self) -> Self {
        match self {
            Self::Origin => Self::Destination,
            Self::Destination => Self::Origin,
        }
    }
}

/// Parameters of a flight search.
///
/// Codes are IATA airport or city codes. Nothing here is validated; the
/// search form owns validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub flight_class: Option<CabinClass>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            departure_date: None,
            return_date: None,
            flight_class: None,
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl SearchParams {
    /// The code stored for `field`.
    pub fn code(&self, field: LocationField) -> Option<&str> {
        match field {
            LocationField::Origin => self.from.as_deref(),
            LocationField::Destination => self.to.as_deref(),
        }
    }

    /// Replace the code stored for `field`.
    pub fn set_code(&mut self, field: LocationField, code: Option<String>) {
        match field {
            LocationField::Origin => self.from = code,
            LocationField::Destination => self.to = code,
        }
    }

    pub fn total_passengers(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn cabin_class_wire_names() {
        assert_eq!(
            serde_json::to_string(&CabinClass::PremiumEconomy).unwrap(),
            "\"PREMIUM_ECONOMY\""
        );
        assert_eq!(CabinClass::PremiumEconomy.to_string(), "PREMIUM_ECONOMY");
        assert_eq!(
            CabinClass::from_str("business").unwrap(),
            CabinClass::Business
        );
        assert_eq!(CabinClass::PremiumEconomy.label(), "Premium Economy");
    }

    #[test]
    fn default_params_have_one_adult() {
        let params = SearchParams::default();
        assert_eq!(params.adults, 1);
        assert_eq!(params.total_passengers(), 1);
        assert!(params.from.is_none());
    }

    #[test]
    fn codes_are_addressed_by_field() {
        let mut params = SearchParams::default();
        params.set_code(LocationField::Destination, Some("CDG".into()));
        assert_eq!(params.code(LocationField::Destination), Some("CDG"));
        assert_eq!(params.code(LocationField::Origin), None);
        assert_eq!(LocationField::Origin.other(), LocationField::Destination);
    }
}
