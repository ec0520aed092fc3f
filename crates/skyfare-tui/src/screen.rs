//! Screen identifiers.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Search,
    Results,
    Detail,
}

impl ScreenId {
    pub const ALL: [ScreenId; 3] = [Self::Search, Self::Results, Self::Detail];

    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Results => "Results",
            Self::Detail => "Flight Details",
        }
    }

    /// Text-entry screens see every key except Ctrl+C.
    pub fn captures_input(self) -> bool {
        matches!(self, Self::Search)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
