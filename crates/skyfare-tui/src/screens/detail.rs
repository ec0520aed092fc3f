//! Detail screen: price summary and the itinerary accordion.
//!
//! One panel per trip; at most one is expanded. Panels open and close over
//! one tick, drawn dimmed while in transition.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use skyfare_core::present::{CONTINUE_LABEL, leg_lines, price_summary, trip_panel};
use skyfare_core::{Accordion, AppStore, FlightOffer};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub struct DetailScreen {
    focused: bool,
    store: Arc<AppStore>,
    offer: Option<Arc<FlightOffer>>,
    accordion: Accordion,
    cursor: usize,
}

impl DetailScreen {
    pub fn new(store: Arc<AppStore>) -> Self {
        Self {
            focused: false,
            store,
            offer: None,
            accordion: Accordion::default(),
            cursor: 0,
        }
    }

    /// Pick up the offer selected on the results screen.
    fn load(&mut self) {
        self.offer = self.store.selected_offer();
        let trips = self.offer.as_ref().map_or(0, |o| o.trips.len());
        self.accordion = Accordion::new(trips);
        self.cursor = 0;
    }

    /// Itinerary lines, plus the line index of the highlighted trip header.
    fn itinerary_lines(&self, offer: &FlightOffer) -> (Vec<Line<'static>>, usize) {
        let mut lines = Vec::new();
        let mut cursor_line = 0;

        for (i, trip) in offer.trips.iter().enumerate() {
            let panel = trip_panel(trip, i);
            let state = self.accordion.state(i);
            let marker = if state.is_expanded() { "▾" } else { "▸" };
            let title_style = if self.focused && i == self.cursor {
                theme::selected()
            } else {
                theme::title_style()
            };

            if i == self.cursor {
                cursor_line = lines.len();
            }

            let mut header = vec![Span::styled(format!(" {marker} {}", panel.title), title_style)];
            if panel.is_return {
                header.push(Span::raw(" "));
                header.push(Span::styled(" RETURN ", theme::badge()));
            }
            lines.push(Line::from(header));

            let mut subtitle = format!("   {}  ·  {}", panel.stops, panel.duration);
            if let Some(ref layover) = panel.layover {
                subtitle.push_str("  ·  ");
                subtitle.push_str(layover);
            }
            lines.push(Line::from(Span::styled(subtitle, theme::key_hint())));

            if state.is_visible() {
                let style = if state.is_transitioning() {
                    theme::transitioning()
                } else {
                    theme::text()
                };
                for leg in &trip.legs {
                    let leg = leg_lines(leg);
                    lines.push(Line::from(Span::styled(format!("     {}", leg.route), style)));
                    lines.push(Line::from(Span::styled(format!("       {}", leg.flight), style)));
                    if let Some(operated_by) = leg.operated_by {
                        lines.push(Line::from(Span::styled(
                            format!("       {operated_by}"),
                            style,
                        )));
                    }
                    lines.push(Line::from(Span::styled(
                        format!("       {}", leg.duration),
                        style,
                    )));
                    if let Some(layover) = leg.layover {
                        lines.push(Line::from(Span::styled(
                            format!("     ⏱ {layover}"),
                            Style::default().fg(theme::ELECTRIC_YELLOW),
                        )));
                    }
                }
            }
            lines.push(Line::from(""));
        }

        (lines, cursor_line)
    }

    fn render_price_summary(frame: &mut Frame, area: Rect, offer: &FlightOffer) {
        let block = Block::default()
            .title(" Price Summary ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let lines: Vec<Line> = price_summary(offer)
            .into_iter()
            .map(|(label, value)| {
                let style = if label == "Total" {
                    theme::price()
                } else {
                    theme::text()
                };
                Line::from(vec![
                    Span::styled(format!(" {label:<12}"), theme::key_hint()),
                    Span::styled(value, style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Component for DetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.accordion.len();
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if len > 0 {
                    self.cursor = (self.cursor + 1).min(len - 1);
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.accordion.toggle(self.cursor);
                None
            }
            KeyCode::Char('c') => Some(Action::Notify(Notification::warning(
                "Booking is not available yet",
            ))),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::SwitchScreen(ScreenId::Results)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if matches!(action, Action::Tick) {
            self.accordion.settle_all();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Flight Details ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(ref offer) = self.offer else {
            frame.render_widget(
                Paragraph::new(Span::styled("No flight selected", theme::key_hint()))
                    .alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let [summary_area, itinerary_area, footer_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        Self::render_price_summary(frame, summary_area, offer);

        let itinerary_block = Block::default()
            .title(" Itinerary ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let visible_rows = usize::from(itinerary_block.inner(itinerary_area).height);
        let (lines, cursor_line) = self.itinerary_lines(offer);
        // Keep the highlighted trip header on screen
        let scroll = cursor_line.saturating_sub(visible_rows.saturating_sub(4));
        frame.render_widget(
            Paragraph::new(lines)
                .block(itinerary_block)
                .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
            itinerary_area,
        );

        frame.render_widget(
            Paragraph::new(Span::styled(format!("  {CONTINUE_LABEL}  "), theme::button()))
                .alignment(Alignment::Center),
            footer_area,
        );
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.load();
        }
    }

    fn key_hints(&self) -> &'static str {
        "j/k move  Enter expand/collapse  Esc back"
    }

    fn id(&self) -> &str {
        "detail"
    }
}
