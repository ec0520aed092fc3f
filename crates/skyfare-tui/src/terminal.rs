//! Raw-mode terminal plus the input and clock sources that drive the app loop.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame, layout::Size};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Housekeeping: toasts expire, panel transitions settle.
    Tick,
    Render,
}

/// Keep key presses and resizes; everything else is noise to the app.
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// The terminal between start and drop. Dropping it restores the shell.
pub struct Console {
    terminal: DefaultTerminal,
    input: EventStream,
    tick: Interval,
    render: Interval,
}

impl Console {
    /// Enter raw mode and the alternate screen. `ratatui::init` also chains
    /// a panic hook that restores the terminal before the report prints.
    pub fn start(tick_rate: Duration, render_rate: Duration) -> Result<Self> {
        let mut console = Self {
            terminal: ratatui::init(),
            input: EventStream::new(),
            tick: clock(tick_rate),
            render: clock(render_rate),
        };
        console.terminal.clear()?;
        Ok(console)
    }

    /// Wait for the next event. `None` once terminal input is gone.
    pub async fn next_event(&mut self) -> Option<Event> {
        loop {
            let raw = tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                _ = self.render.tick() => return Some(Event::Render),
                raw = self.input.next() => raw,
            };
            match raw? {
                Ok(event) => {
                    if let Some(event) = translate(event) {
                        return Some(event);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "terminal input failed");
                    return None;
                }
            }
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn size(&self) -> Result<Size> {
        Ok(self.terminal.size()?)
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn key(kind: KeyEventKind) -> TermEvent {
        TermEvent::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_reach_the_app() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
        assert_eq!(translate(key(KeyEventKind::Release)), None);
        assert_eq!(translate(key(KeyEventKind::Repeat)), None);
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(translate(TermEvent::Resize(120, 40)), Some(Event::Resize(120, 40)));
        assert_eq!(translate(TermEvent::FocusGained), None);
    }
}
