// ── Search form ──
//
// Form-local state (trip type, return-date visibility, class dropdown,
// submit state) on top of the shared store. Field values themselves live
// in the store's `SearchParams`.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::autocomplete::Autocomplete;
use crate::disclosure::Disclosure;
use crate::model::{CabinClass, SearchParams, TripType};
use crate::store::AppStore;

/// Message shown when required fields are missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields";

// ── Validation ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Origin,
    Destination,
    DepartureDate,
    CabinClass,
    Adults,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::DepartureDate => "departure date",
            Self::CabinClass => "cabin class",
            Self::Adults => "adults (at least 1)",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill all required fields")]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

impl ValidationError {
    /// Comma-separated list of the missing fields.
    pub fn missing_list(&self) -> String {
        self.missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Check that a search can be submitted.
pub fn validate(params: &SearchParams) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if params.from.as_deref().is_none_or(str::is_empty) {
        missing.push(RequiredField::Origin);
    }
    if params.to.as_deref().is_none_or(str::is_empty) {
        missing.push(RequiredField::Destination);
    }
    if params.departure_date.is_none() {
        missing.push(RequiredField::DepartureDate);
    }
    if params.flight_class.is_none() {
        missing.push(RequiredField::CabinClass);
    }
    if params.adults < 1 {
        missing.push(RequiredField::Adults);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A search is already in progress")]
    Busy,

    #[error("{date} is in the past (earliest is {today})")]
    DateInPast { date: NaiveDate, today: NaiveDate },

    #[error("Return date is only used for round trips")]
    ReturnHidden,

    #[error("Return date {date} is before departure {departure}")]
    ReturnBeforeDeparture { date: NaiveDate, departure: NaiveDate },

    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    BadDate { input: String },
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| FormError::BadDate {
        input: input.to_owned(),
    })
}

// ── Submit state ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Searching,
}

// ── SearchForm ───────────────────────────────────────────────────

pub struct SearchForm {
    store: Arc<AppStore>,
    autocomplete: Arc<Autocomplete>,
    trip_type: TripType,
    return_visible: bool,
    class_menu: Disclosure,
    class_cursor: usize,
    submit_state: SubmitState,
    today: NaiveDate,
}

impl SearchForm {
    pub fn new(autocomplete: Arc<Autocomplete>) -> Self {
        Self::with_today(autocomplete, Local::now().date_naive())
    }

    /// Build a form whose earliest selectable date is `today`.
    pub fn with_today(autocomplete: Arc<Autocomplete>, today: NaiveDate) -> Self {
        let store = Arc::clone(autocomplete.store());
        Self {
            store,
            autocomplete,
            trip_type: TripType::RoundTrip,
            return_visible: true,
            class_menu: Disclosure::Closed,
            class_cursor: 0,
            submit_state: SubmitState::Idle,
            today,
        }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn autocomplete(&self) -> &Arc<Autocomplete> {
        &self.autocomplete
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ── Trip type ────────────────────────────────────────────────────

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn is_return_visible(&self) -> bool {
        self.return_visible
    }

    /// Switch trip type.
    ///
    /// One-way hides the return date and clears it. Round-trip shows the
    /// field again but never fills it in. Multi-city leaves visibility as is.
    pub fn set_trip_type(&mut self, trip_type: TripType) {
        match trip_type {
            TripType::OneWay => {
                self.return_visible = false;
                self.store.update_search_params(|p| p.return_date = None);
            }
            TripType::RoundTrip => self.return_visible = true,
            TripType::MultiCity => {}
        }
        debug!(from = %self.trip_type, to = %trip_type, "trip type changed");
        self.trip_type = trip_type;
    }

    // ── Locations ────────────────────────────────────────────────────

    /// Exchange origin and destination text and codes.
    pub fn swap(&self) {
        self.autocomplete.swap();
    }

    // ── Dates ────────────────────────────────────────────────────────

    /// Set the departure date. A stored return date that would fall before
    /// it is cleared.
    pub fn set_departure_date(&self, date: NaiveDate) -> Result<(), FormError> {
        self.check_not_past(date)?;
        self.store.update_search_params(|p| {
            p.departure_date = Some(date);
            if p.return_date.is_some_and(|r| r < date) {
                p.return_date = None;
            }
        });
        Ok(())
    }

    pub fn clear_departure_date(&self) {
        self.store.update_search_params(|p| p.departure_date = None);
    }

    pub fn set_return_date(&self, date: NaiveDate) -> Result<(), FormError> {
        if !self.return_visible {
            return Err(FormError::ReturnHidden);
        }
        self.check_not_past(date)?;
        if let Some(departure) = self.store.search_params().departure_date {
            if date < departure {
                return Err(FormError::ReturnBeforeDeparture { date, departure });
            }
        }
        self.store
            .update_search_params(|p| p.return_date = Some(date));
        Ok(())
    }

    pub fn clear_return_date(&self) {
        self.store.update_search_params(|p| p.return_date = None);
    }

    fn check_not_past(&self, date: NaiveDate) -> Result<(), FormError> {
        if date < self.today {
            return Err(FormError::DateInPast {
                date,
                today: self.today,
            });
        }
        Ok(())
    }

    // ── Passengers ───────────────────────────────────────────────────

    pub fn increment_adults(&self) {
        self.store
            .update_search_params(|p| p.adults = p.adults.saturating_add(1));
    }

    /// Decrement adults, never going below 1.
    pub fn decrement_adults(&self) {
        self.store
            .update_search_params(|p| p.adults = p.adults.saturating_sub(1).max(1));
    }

    // ── Cabin class dropdown ─────────────────────────────────────────

    pub fn class_menu(&self) -> Disclosure {
        self.class_menu
    }

    pub fn class_cursor(&self) -> usize {
        self.class_cursor
    }

    pub fn toggle_class_menu(&mut self) {
        if !self.class_menu.is_expanded() {
            // Start the cursor on the current choice.
            let current = self.store.search_params().flight_class;
            self.class_cursor = current
                .and_then(|c| self.store.cabin_classes().iter().position(|k| *k == c))
                .unwrap_or(0);
        }
        self.class_menu.toggle();
    }

    pub fn close_class_menu(&mut self) {
        self.class_menu.close();
    }

    /// Finish any dropdown transition.
    pub fn settle(&mut self) {
        self.class_menu.settle();
    }

    pub fn move_class_cursor(&mut self, delta: isize) {
        let len = self.store.cabin_classes().len();
        if len == 0 {
            return;
        }
        let next = self
            .class_cursor
            .saturating_add_signed(delta)
            .min(len - 1);
        self.class_cursor = next;
    }

    /// Store `class` and close the dropdown.
    pub fn select_class(&mut self, class: CabinClass) {
        self.store
            .update_search_params(|p| p.flight_class = Some(class));
        self.class_menu.close();
    }

    /// Select the class under the dropdown cursor.
    pub fn select_highlighted_class(&mut self) {
        if let Some(class) = self.store.cabin_classes().get(self.class_cursor).copied() {
            self.select_class(class);
        }
    }

    // ── Submission ───────────────────────────────────────────────────

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn is_searching(&self) -> bool {
        self.submit_state == SubmitState::Searching
    }

    /// Validate and enter the searching state.
    ///
    /// On success the caller runs the search with the returned params and
    /// calls [`finish_search`](Self::finish_search) when it completes.
    pub fn submit(&mut self) -> Result<SearchParams, FormError> {
        if self.is_searching() {
            return Err(FormError::Busy);
        }
        let params = self.store.search_params();
        validate(&params)?;
        self.class_menu.close();
        self.submit_state = SubmitState::Searching;
        debug!(from = ?params.from, to = ?params.to, "search submitted");
        Ok(params)
    }

    pub fn finish_search(&mut self) {
        self.submit_state = SubmitState::Idle;
    }
}
