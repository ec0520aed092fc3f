//! Reactive state and screen logic between `skyfare-api` and the UIs (CLI / TUI).
//!
//! This crate owns every rule of the flight-search flow so it can be tested
//! without a terminal:
//!
//! - **[`Session`]**: Cheaply cloneable facade bundling the store, the
//!   autocomplete flow, the search backend and a broadcast channel of
//!   [`SessionEvent`]s.
//!
//! - **[`AppStore`]**: Injectable state store. Every value lives in a
//!   `tokio::sync::watch`-backed slot, so a mutation is visible to every
//!   subscriber immediately. No validation happens here.
//!
//! - **[`Autocomplete`]**: Length-gated suggestion lookups with per-field
//!   request generations; superseded responses are dropped.
//!
//! - **[`SearchForm`]**: Trip-type state machine, swap, passenger counter,
//!   class dropdown and submit validation.
//!
//! - **[`ResultsView`]** and [`present`]: Offer list state (label-only sort,
//!   cheapest badge, empty state) and pure card/detail formatting.
//!
//! - **[`Disclosure`]** / **[`Accordion`]**: `{closed, opening, open,
//!   closing}` state machine behind the class dropdown and trip panels.

pub mod autocomplete;
pub mod config;
pub mod convert;
pub mod disclosure;
pub mod error;
pub mod event;
pub mod form;
pub mod model;
pub mod present;
pub mod results;
pub mod search;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use autocomplete::{Autocomplete, LocationSource, LookupOutcome, LookupTicket};
pub use config::{SessionConfig, TlsVerification};
pub use disclosure::{Accordion, Disclosure};
pub use error::CoreError;
pub use event::SessionEvent;
pub use form::{FormError, RequiredField, SearchForm, SubmitState, ValidationError};
pub use results::{ResultsView, SortKey};
pub use search::{SearchBackend, StubSearch};
pub use session::Session;
pub use store::AppStore;
pub use stream::SlotStream;

pub use model::{
    CabinClass, FlightOffer, Leg, LocationField, LocationSuggestion, SearchParams,
    SuggestionKind, Trip, TripDirection, TripType,
};
