// ── Disclosure state machine ──
//
// Drives the class dropdown and the per-trip accordion panels. Transitions
// are requested explicitly; `settle()` finishes whatever transition is in
// progress. How long a transition takes on screen is up to the renderer.

/// `{closed, opening, open, closing}` state of a collapsible element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disclosure {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Disclosure {
    /// Request expansion. No-op if already opening or open.
    pub fn open(&mut self) {
        if matches!(self, Self::Closed | Self::Closing) {
            *self = Self::Opening;
        }
    }

    /// Request collapse. No-op if already closing or closed.
    pub fn close(&mut self) {
        if matches!(self, Self::Open | Self::Opening) {
            *self = Self::Closing;
        }
    }

    /// Reverse the current direction of travel.
    pub fn toggle(&mut self) {
        if self.is_expanded() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Complete an in-progress transition.
    pub fn settle(&mut self) {
        *self = match *self {
            Self::Opening => Self::Open,
            Self::Closing => Self::Closed,
            other => other,
        };
    }

    /// `true` when heading towards (or at) the open state.
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    /// `true` while any part of the element should be drawn.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// A set of panels where at most one is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    panels: Vec<Disclosure>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self {
            panels: vec![Disclosure::Closed; len],
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Press panel `index`: collapse it if expanded, otherwise expand it
    /// and collapse every other panel. Out-of-range presses are ignored.
    pub fn toggle(&mut self, index: usize) {
        let Some(target) = self.panels.get(index).copied() else {
            return;
        };

        if target.is_expanded() {
            if let Some(panel) = self.panels.get_mut(index) {
                panel.close();
            }
            return;
        }

        for (i, panel) in self.panels.iter_mut().enumerate() {
            if i == index {
                panel.open();
            } else {
                panel.close();
            }
        }
    }

    /// Index of the expanded (or expanding) panel.
    pub fn expanded(&self) -> Option<usize> {
        self.panels.iter().position(|p| p.is_expanded())
    }

    pub fn state(&self, index: usize) -> Disclosure {
        self.panels.get(index).copied().unwrap_or_default()
    }

    pub fn settle_all(&mut self) {
        for panel in &mut self.panels {
            panel.settle();
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.panels.iter().any(|p| p.is_transitioning())
    }
}
