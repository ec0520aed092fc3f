//! Results screen: offer cards, sort selector, preview panel.
//!
//! The sort selector only moves the highlighted label; cards stay in the
//! order the search returned them.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use skyfare_core::present::{BOOK_LABEL, card_summary};
use skyfare_core::{FlightOffer, ResultsView, SortKey};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub struct ResultsScreen {
    focused: bool,
    view: ResultsView,
}

impl ResultsScreen {
    pub fn new(view: ResultsView) -> Self {
        Self {
            focused: false,
            view,
        }
    }

    fn card(&self, index: usize, offer: &FlightOffer) -> ListItem<'static> {
        let card = card_summary(offer);
        let mut lines = Vec::new();

        for trip in &card.trips {
            let mut header = vec![Span::styled(trip.carrier.clone(), theme::title_style())];
            if trip.is_return {
                header.push(Span::raw(" "));
                header.push(Span::styled(" RETURN ", theme::badge()));
            }
            header.push(Span::styled(format!("  {}", trip.subtitle), theme::key_hint()));
            lines.push(Line::from(header));

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} {}", trip.departure_airport, trip.departure_time),
                    theme::text(),
                ),
                Span::styled(format!(" ── {} ── ", trip.duration), theme::key_hint()),
                Span::styled(
                    format!("{} {}", trip.arrival_time, trip.arrival_airport),
                    theme::text(),
                ),
                Span::styled(format!("   {}", trip.stops), theme::key_hint()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}  →  {}", trip.departure_date, trip.arrival_date),
                theme::key_hint(),
            )));
        }

        let mut footer = vec![
            Span::styled(card.price, theme::price()),
            Span::styled(format!("  {}", card.base_price), theme::key_hint()),
        ];
        if self.view.is_cheapest(index) {
            footer.push(Span::raw("  "));
            footer.push(Span::styled(" Cheapest ", theme::badge()));
        }
        if index == self.view.cursor() {
            footer.push(Span::raw("  "));
            footer.push(Span::styled(format!(" {BOOK_LABEL} "), theme::button()));
        }
        lines.push(Line::from(footer));
        lines.push(Line::from(""));

        ListItem::new(lines)
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = self.view.header();
        let mut sort = vec![Span::styled(" Sort by: ", theme::key_hint())];
        for key in SortKey::ALL {
            let style = if key == self.view.sort_key() {
                theme::sort_active()
            } else {
                theme::sort_inactive()
            };
            sort.push(Span::styled(key.to_string(), style));
            sort.push(Span::raw("  "));
        }

        let lines = vec![
            Line::from(Span::styled(format!(" {}", header.route), theme::title_style())),
            Line::from(Span::styled(format!(" {}", header.details), theme::text())),
            Line::from(Span::styled(format!(" {}", self.view.count_line()), theme::key_hint())),
            Line::from(sort),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let Some(preview) = self.view.preview(self.view.cursor()) else {
            return;
        };
        let block = Block::default()
            .title(" Flight Details ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let lines = vec![
            Line::from(vec![
                Span::styled(preview.airline, theme::text()),
                Span::raw("  "),
                Span::styled(preview.price, theme::price()),
            ]),
            Line::from(vec![
                Span::styled("Departure: ", theme::key_hint()),
                Span::styled(preview.departure, theme::text()),
                Span::styled("   Arrival: ", theme::key_hint()),
                Span::styled(preview.arrival, theme::text()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let Some(empty) = self.view.empty_state() else {
            return;
        };
        let [_, body] =
            Layout::vertical([Constraint::Percentage(35), Constraint::Min(0)]).areas(area);
        let lines = vec![
            Line::from(Span::styled("✈", theme::key_hint())),
            Line::from(""),
            Line::from(Span::styled(empty.message, theme::text())),
            Line::from(""),
            Line::from(Span::styled(format!("  {}  ", empty.action), theme::button())),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }
}

impl Component for ResultsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let empty = self.view.offers().is_empty();
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.view.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.view.previous();
                None
            }
            KeyCode::Char('s') => {
                self.view.cycle_sort();
                None
            }
            KeyCode::Enter if empty => Some(Action::SwitchScreen(ScreenId::Search)),
            KeyCode::Enter => self
                .view
                .select_highlighted()
                .map(|_| Action::SwitchScreen(ScreenId::Detail)),
            KeyCode::Char('e') | KeyCode::Esc => Some(Action::SwitchScreen(ScreenId::Search)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::OffersUpdated(_) = action {
            self.view.reset();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Results ")
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

        let [header_area, list_area, preview_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .areas(inner);

        self.render_header(frame, header_area);

        let offers = self.view.offers();
        if offers.is_empty() {
            self.render_empty(frame, list_area);
            return;
        }

        let items: Vec<ListItem> = offers
            .iter()
            .enumerate()
            .map(|(i, offer)| self.card(i, offer))
            .collect();
        let list = List::new(items)
            .highlight_style(theme::selected())
            .highlight_symbol("▌ ");
        let mut state = ListState::default().with_selected(Some(self.view.cursor()));
        frame.render_stateful_widget(list, list_area, &mut state);

        self.render_preview(frame, preview_area);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> &'static str {
        "j/k move  Enter details  s sort  e edit search"
    }

    fn id(&self) -> &str {
        "results"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use skyfare_core::{Session, SessionConfig};

    use super::*;

    const OFFER_JSON: &str = r#"{
        "currencyCode": "EUR",
        "totalPrice": "412.30",
        "basePrice": 350,
        "totalTravelers": 1,
        "trips": [{
            "tripNo": 1, "from": "JFK", "to": "CDG", "tripType": "ONE_WAY",
            "stops": 0, "totalFlightDuration": "7h 20m",
            "legs": [{
                "legNo": 1, "departureAirport": "JFK", "arrivalAirport": "CDG",
                "departureDateTime": "2025-05-01T18:30:00",
                "arrivalDateTime": "2025-05-02T07:50:00",
                "carrierCode": "AF", "carrierName": "Air France",
                "flightNumber": 7, "aircraftCode": "77W", "duration": "7h 20m"
            }]
        }]
    }"#;

    fn offer() -> FlightOffer {
        serde_json::from_str(OFFER_JSON).unwrap()
    }

    fn session() -> Session {
        let config = SessionConfig::new("http://127.0.0.1:9/api".parse().unwrap());
        Session::new(config).unwrap()
    }

    fn press(screen: &mut ResultsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn rendered(screen: &ResultsScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn enter_selects_offer_and_opens_detail() {
        let session = session();
        session.store().set_flight_offers(vec![offer(), offer()]);
        let mut screen = ResultsScreen::new(session.results_view());

        press(&mut screen, KeyCode::Down);
        let action = press(&mut screen, KeyCode::Enter);

        assert!(matches!(action, Some(Action::SwitchScreen(ScreenId::Detail))));
        assert!(session.store().selected_offer().is_some());
    }

    #[test]
    fn sort_changes_label_not_order() {
        let session = session();
        let mut cheap = offer();
        cheap.total_price = "99.00".into();
        session.store().set_flight_offers(vec![offer(), cheap]);
        let mut screen = ResultsScreen::new(session.results_view());

        press(&mut screen, KeyCode::Char('s'));

        assert_eq!(screen.view.sort_key(), SortKey::Duration);
        assert_eq!(screen.view.offers()[0].total_price, "412.30");
        assert_eq!(screen.view.offers()[1].total_price, "99.00");
    }

    #[test]
    fn empty_state_offers_another_search() {
        let session = session();
        let mut screen = ResultsScreen::new(session.results_view());

        let text = rendered(&screen);
        assert!(text.contains("No flights found"));
        assert!(text.contains("Try Another Search"));

        let action = press(&mut screen, KeyCode::Enter);
        assert!(matches!(action, Some(Action::SwitchScreen(ScreenId::Search))));
        assert!(session.store().selected_offer().is_none());
    }

    #[test]
    fn cards_show_price_and_cheapest_badge() {
        let session = session();
        session.store().set_flight_offers(vec![offer()]);
        let screen = ResultsScreen::new(session.results_view());

        let text = rendered(&screen);
        assert!(text.contains("EUR 412.30"));
        assert!(text.contains("Cheapest"));
        assert!(text.contains("Air France (77W)"));
        assert!(text.contains("1 flight found"));
    }

    #[test]
    fn new_offers_reset_cursor() {
        let session = session();
        session.store().set_flight_offers(vec![offer(), offer()]);
        let mut screen = ResultsScreen::new(session.results_view());
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.view.cursor(), 1);

        screen
            .update(&Action::OffersUpdated(session.store().flight_offers()))
            .unwrap();
        assert_eq!(screen.view.cursor(), 0);
    }
}
