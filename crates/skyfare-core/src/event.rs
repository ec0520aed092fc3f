// ── Session events ──
//
// Broadcast to UIs so they can surface alerts without polling.

use crate::model::LocationField;

/// Alert text shown when a suggestion lookup fails.
pub const LOOKUP_FAILED_ALERT: &str = "Failed to fetch suggestions. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A suggestion lookup failed; the field's list has been emptied.
    LookupFailed {
        field: LocationField,
        message: String,
    },
    /// A flight search finished and its offers are in the store.
    SearchCompleted { count: usize },
    /// A flight search failed; previous offers are untouched.
    SearchFailed { message: String },
}
