// ── Domain model ──

pub mod location;
pub mod offer;
pub mod search;

pub use location::{LocationSuggestion, SuggestionKind};
pub use offer::{FlightOffer, Leg, Trip, TripDirection};
pub use search::{CabinClass, LocationField, SearchParams, TripType};
