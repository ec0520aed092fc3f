//! All UI actions. Actions are the only way state changes reach screens.

use std::sync::Arc;

use skyfare_core::{FlightOffer, LocationField, LookupTicket, SearchParams};

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ──
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Autocomplete ──
    /// Run a suggestion lookup issued by the form.
    Lookup(LookupTicket),
    /// A field's suggestion list was replaced.
    SuggestionsUpdated {
        field: LocationField,
        count: usize,
    },
    /// A lookup failed; the field's suggestions were cleared.
    LookupFailed {
        field: LocationField,
        message: String,
    },

    // ── Search ──
    /// Form validated; run the search with these params.
    Search(SearchParams),
    SearchCompleted { count: usize },
    SearchFailed(String),
    OffersUpdated(Arc<Vec<FlightOffer>>),

    // ── Notifications ──
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }
}
