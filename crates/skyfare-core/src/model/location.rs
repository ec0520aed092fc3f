use serde::{Deserialize, Serialize};

/// Whether a suggestion came from an outer group entry or one of its
/// nested airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Group,
    Airport,
}

/// One row of the autocomplete dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub id: String,
    pub name: String,
    pub iata: String,
    pub kind: SuggestionKind,
}

impl LocationSuggestion {
    /// Text written back into the input once the suggestion is chosen.
    pub fn display_text(&self) -> String {
        format!("{} - {}", self.name, self.iata)
    }
}
