//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use skyfare_core::{LookupOutcome, LookupTicket, SearchParams, Session};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::terminal::{Console, Event};

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    session: Session,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Offers from the last search, for the status bar.
    offer_count: usize,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancels the data bridge task.
    data_cancel: CancellationToken,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(&session).into_iter().collect();

        Self {
            session,
            active_screen: ScreenId::Search,
            screens,
            running: true,
            help_visible: false,
            offer_count: 0,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            notification: None,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut console = Console::start(
            Duration::from_millis(250), // 4 Hz tick, also the panel transition time
            Duration::from_millis(33),  // ~30 FPS render
        )?;
        self.init_screens()?;

        {
            let session = self.session.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(session, tx, cancel).await;
            });
        }

        info!(size = ?console.size().ok(), "TUI event loop started");

        while self.running {
            let Some(event) = console.next_event().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    console.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        drop(console);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys first; everything else
    /// goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if key.code == KeyCode::F(1) {
            return Ok(Some(Action::ToggleHelp));
        }

        if !self.active_screen.captures_input() && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(..) | Action::Render => {}

            Action::SwitchScreen(target) => self.switch_screen(*target),

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                self.forward_to_active(action)?;
            }

            Action::Lookup(ticket) => self.spawn_lookup(ticket.clone()),

            Action::LookupFailed { message, .. } => {
                self.notification = Some((Notification::error(message.clone()), Instant::now()));
                self.forward_to(ScreenId::Search, action)?;
            }

            Action::Search(params) => self.spawn_search(params.clone()),

            Action::SearchCompleted { count } => {
                self.offer_count = *count;
                let notif = match count {
                    0 => Notification::info("No flights found"),
                    1 => Notification::success("1 flight found"),
                    n => Notification::success(format!("{n} flights found")),
                };
                self.notification = Some((notif, Instant::now()));
                self.forward_to(ScreenId::Search, action)?;
            }

            Action::SearchFailed(message) => {
                self.notification = Some((
                    Notification::error(format!("Search failed: {message}")),
                    Instant::now(),
                ));
                self.forward_to(ScreenId::Search, action)?;
            }

            Action::SuggestionsUpdated { .. } => self.forward_to(ScreenId::Search, action)?,

            Action::OffersUpdated(offers) => {
                self.offer_count = offers.len();
                self.forward_to(ScreenId::Results, action)?;
            }

            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),
        }
        Ok(())
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    fn forward_to(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        self.forward_to(self.active_screen, action)
    }

    // ── Background work ─────────────────────────────────────────────

    /// Run a suggestion lookup. Failures reach the UI as a session event.
    fn spawn_lookup(&self, ticket: LookupTicket) {
        let autocomplete = Arc::clone(self.session.autocomplete());
        tokio::spawn(async move {
            match autocomplete.lookup(ticket).await {
                LookupOutcome::Applied { count } => debug!(count, "suggestions updated"),
                LookupOutcome::Superseded => debug!("lookup superseded"),
                LookupOutcome::Failed(e) => debug!(error = %e, "lookup failed"),
            }
        });
    }

    /// Run the flight search. Completion reaches the UI as a session event.
    fn spawn_search(&self, params: SearchParams) {
        let session = self.session.clone();
        tokio::spawn(async move {
            if let Err(e) = session.search(params).await {
                warn!(error = %e, "flight search failed");
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_status_bar(frame, status_area);

        // Overlays, last drawn is topmost
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = self
            .screens
            .get(&self.active_screen)
            .map_or("", |s| s.key_hints());

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.active_screen.label()),
                Style::default().fg(theme::ELECTRIC_PURPLE),
            ),
            Span::styled("│ ", theme::key_hint()),
        ];
        if self.offer_count > 0 {
            spans.push(Span::styled(
                format!("{} offers  ", self.offer_count),
                Style::default().fg(theme::SUCCESS_GREEN),
            ));
        }
        spans.push(Span::styled(hints, theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 22u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let row = |key: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(text, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Search"),
            row("Tab", "Next field"),
            row("↑/↓", "Suggestions / fields"),
            row("Enter", "Pick suggestion / open class menu / search"),
            row("Ctrl+X", "Swap origin and destination"),
            row("←/→ +/-", "Trip type / adults"),
            row("Esc", "Close suggestions or menu"),
            Line::from(""),
            section("Results"),
            row("j/k", "Move"),
            row("Enter", "Flight details"),
            row("s", "Sort label"),
            row("e / Esc", "Edit search"),
            Line::from(""),
            section("Details"),
            row("Enter", "Expand / collapse trip"),
            row("Esc", "Back to results"),
            Line::from(""),
            row("F1 / ?", "This help       Ctrl+C / q  Quit"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 70)
            .min(area.width);
        let height = 3u16.min(area.height);

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use skyfare_core::{LocationField, SessionConfig};

    use super::*;

    fn app() -> App {
        let config = SessionConfig::new("http://127.0.0.1:9/api".parse().unwrap());
        let mut app = App::new(Session::new(config).unwrap());
        app.init_screens().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn search_screen_keeps_q_as_text() {
        let mut app = app();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        assert_eq!(app.session.store().input(LocationField::Origin), "q");
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn q_quits_outside_search() {
        let mut app = app();
        app.process_action(&Action::SwitchScreen(ScreenId::Results))
            .unwrap();
        assert_eq!(app.active_screen, ScreenId::Results);

        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.help_visible);

        assert!(app.handle_key_event(key(KeyCode::Char('x'))).unwrap().is_none());
        assert_eq!(app.session.store().input(LocationField::Origin), "");

        let close = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(close, Some(Action::ToggleHelp)));
    }

    #[test]
    fn lookup_failure_raises_error_toast() {
        let mut app = app();
        app.process_action(&Action::LookupFailed {
            field: LocationField::Origin,
            message: "Failed to fetch suggestions. Please try again.".into(),
        })
        .unwrap();

        let (notif, _) = app.notification.clone().unwrap();
        assert_eq!(notif.level, NotificationLevel::Error);
        assert_eq!(notif.message, "Failed to fetch suggestions. Please try again.");
    }

    #[test]
    fn notifications_expire() {
        let mut app = app();
        app.notification = Some((
            Notification::info("hi"),
            Instant::now().checked_sub(Duration::from_secs(5)).unwrap(),
        ));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }
}
