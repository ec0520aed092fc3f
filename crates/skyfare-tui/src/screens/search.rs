//! Search screen: trip type, origin/destination with live suggestions,
//! dates, passengers, cabin class and the submit button.
//!
//! Captures every key except Ctrl+C (see `ScreenId::captures_input`), so
//! typing `q` or `?` goes into the focused input. Suggestion lookups are
//! issued as [`Action::Lookup`] and run by the app loop.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::debug;

use skyfare_core::form::parse_date;
use skyfare_core::{FormError, LocationField, SearchForm, SuggestionKind, TripType};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

const TRIP_TYPES: [TripType; 3] = [TripType::RoundTrip, TripType::OneWay, TripType::MultiCity];
const MAX_SUGGESTION_ROWS: u16 = 6;
const DATE_INPUT_LEN: usize = 10;

/// Which form element has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    TripType,
    Origin,
    Destination,
    Departure,
    Return,
    Adults,
    Class,
    Submit,
}

impl FormField {
    /// Tab order. `Return` is skipped while the return date is hidden.
    const ALL: [FormField; 8] = [
        Self::TripType,
        Self::Origin,
        Self::Destination,
        Self::Departure,
        Self::Return,
        Self::Adults,
        Self::Class,
        Self::Submit,
    ];

    fn location(self) -> Option<LocationField> {
        match self {
            Self::Origin => Some(LocationField::Origin),
            Self::Destination => Some(LocationField::Destination),
            _ => None,
        }
    }
}

/// One bordered single-line input.
#[derive(Clone, Copy)]
struct TextInput<'a> {
    field: FormField,
    title: &'a str,
    text: &'a str,
    placeholder: &'a str,
    loading: bool,
}

pub struct SearchScreen {
    focused: bool,
    form: SearchForm,
    field: FormField,
    suggestion_cursor: usize,
    departure_input: String,
    return_input: String,
    throbber_state: ThrobberState,
}

impl SearchScreen {
    pub fn new(form: SearchForm) -> Self {
        Self {
            focused: false,
            form,
            field: FormField::Origin,
            suggestion_cursor: 0,
            departure_input: String::new(),
            return_input: String::new(),
            throbber_state: ThrobberState::default(),
        }
    }

    // ── Focus ────────────────────────────────────────────────────────

    fn visible_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| *f != FormField::Return || self.form.is_return_visible())
            .collect()
    }

    /// Commit the date being edited, then move focus. Focus stays put if
    /// the date doesn't parse or is rejected.
    fn move_focus(&mut self, forward: bool) -> Option<Action> {
        if let Err(e) = self.commit_date() {
            return Some(Action::Notify(Notification::error(e.to_string())));
        }

        let fields = self.visible_fields();
        let len = fields.len();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        if let Some(field) = fields.get(next) {
            self.field = *field;
        }
        self.suggestion_cursor = 0;
        None
    }

    // ── Dates ────────────────────────────────────────────────────────

    fn commit_date(&mut self) -> Result<(), FormError> {
        match self.field {
            FormField::Departure => {
                let text = self.departure_input.trim();
                if text.is_empty() {
                    self.form.clear_departure_date();
                    return Ok(());
                }
                let date = parse_date(text)?;
                self.form.set_departure_date(date)?;
                // A later departure may have cleared the return date
                self.sync_dates();
                Ok(())
            }
            FormField::Return => {
                let text = self.return_input.trim();
                if text.is_empty() {
                    self.form.clear_return_date();
                    return Ok(());
                }
                let date = parse_date(text)?;
                self.form.set_return_date(date)
            }
            _ => Ok(()),
        }
    }

    /// Show the stored dates in the inputs.
    fn sync_dates(&mut self) {
        let params = self.form.store().search_params();
        self.departure_input = params
            .departure_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        self.return_input = params
            .return_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
    }

    fn handle_date_key(&mut self, key: KeyEvent) -> Option<Action> {
        let input = if self.field == FormField::Departure {
            &mut self.departure_input
        } else {
            &mut self.return_input
        };

        match key.code {
            KeyCode::Char(c) if (c.is_ascii_digit() || c == '-') && input.len() < DATE_INPUT_LEN => {
                input.push(c);
                None
            }
            KeyCode::Backspace => {
                input.pop();
                None
            }
            KeyCode::Enter | KeyCode::Down => self.move_focus(true),
            KeyCode::Up => self.move_focus(false),
            _ => None,
        }
    }

    // ── Locations ────────────────────────────────────────────────────

    fn input_changed(&mut self, field: LocationField, text: &str) -> Option<Action> {
        self.suggestion_cursor = 0;
        self.form
            .autocomplete()
            .input_changed(field, text)
            .map(Action::Lookup)
    }

    fn handle_location_key(&mut self, field: LocationField, key: KeyEvent) -> Option<Action> {
        let suggestions = self.form.store().suggestions(field);

        match key.code {
            KeyCode::Char(c) if is_text_key(key) => {
                let mut text = self.form.store().input(field);
                text.push(c);
                self.input_changed(field, &text)
            }
            KeyCode::Backspace => {
                let mut text = self.form.store().input(field);
                text.pop();
                self.input_changed(field, &text)
            }
            KeyCode::Down if !suggestions.is_empty() => {
                self.suggestion_cursor = (self.suggestion_cursor + 1).min(suggestions.len() - 1);
                None
            }
            KeyCode::Up if !suggestions.is_empty() => {
                self.suggestion_cursor = self.suggestion_cursor.saturating_sub(1);
                None
            }
            KeyCode::Enter => match suggestions.get(self.suggestion_cursor) {
                Some(choice) => {
                    self.form.autocomplete().select(field, choice);
                    self.move_focus(true)
                }
                None => self.move_focus(true),
            },
            KeyCode::Esc if !suggestions.is_empty() => {
                self.form.autocomplete().dismiss(field);
                self.suggestion_cursor = 0;
                None
            }
            KeyCode::Down => self.move_focus(true),
            KeyCode::Up => self.move_focus(false),
            _ => None,
        }
    }

    // ── Other fields ─────────────────────────────────────────────────

    fn cycle_trip_type(&mut self, forward: bool) {
        let len = TRIP_TYPES.len();
        let idx = TRIP_TYPES
            .iter()
            .position(|t| *t == self.form.trip_type())
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        if let Some(trip) = TRIP_TYPES.get(next) {
            self.form.set_trip_type(*trip);
        }
        if !self.form.is_return_visible() {
            self.return_input.clear();
        }
    }

    fn handle_class_menu_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.form.move_class_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.form.move_class_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.form.select_highlighted_class(),
            KeyCode::Esc | KeyCode::Tab => self.form.close_class_menu(),
            _ => {}
        }
        None
    }

    fn submit(&mut self) -> Option<Action> {
        match self.form.submit() {
            Ok(params) => {
                debug!("search form submitted");
                Some(Action::Search(params))
            }
            Err(FormError::Invalid(e)) => Some(Action::Notify(Notification::error(format!(
                "{e}: {}",
                e.missing_list()
            )))),
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn border(&self, field: FormField) -> Style {
        if self.focused && self.field == field {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }

    fn render_trip_types(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for trip in TRIP_TYPES {
            let selected = trip == self.form.trip_type();
            let marker = if selected { "◉" } else { "○" };
            let style = if selected {
                theme::sort_active()
            } else {
                theme::sort_inactive()
            };
            spans.push(Span::styled(format!("{marker} {trip}"), style));
            spans.push(Span::raw("   "));
        }
        if self.focused && self.field == FormField::TripType {
            spans.push(Span::styled("←/→ change", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_text_input(&self, frame: &mut Frame, area: Rect, input: &TextInput<'_>) {
        let TextInput {
            field,
            title,
            text,
            placeholder,
            loading,
        } = *input;
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border(field));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, spinner_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

        let mut spans = if text.is_empty() {
            vec![Span::styled(placeholder.to_owned(), theme::placeholder())]
        } else {
            vec![Span::styled(text.to_owned(), theme::text())]
        };
        if self.focused && self.field == field {
            spans.push(Span::styled("█", Style::default().fg(theme::NEON_CYAN)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), text_area);

        if loading {
            let throbber = Throbber::default().throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, spinner_area, &mut self.throbber_state.clone());
        }
    }

    fn render_location(&self, frame: &mut Frame, area: Rect, field: LocationField) {
        let store = self.form.store();
        let (form_field, title, placeholder) = match field {
            LocationField::Origin => (FormField::Origin, "From", "City or airport"),
            LocationField::Destination => (FormField::Destination, "To", "City or airport"),
        };
        let text = store.input(field);
        let input = TextInput {
            field: form_field,
            title,
            text: &text,
            placeholder,
            loading: store.is_loading(field),
        };
        self.render_text_input(frame, area, &input);
    }

    fn render_dates(&self, frame: &mut Frame, area: Rect) {
        let departure = TextInput {
            field: FormField::Departure,
            title: "Departure",
            text: &self.departure_input,
            placeholder: "YYYY-MM-DD",
            loading: false,
        };

        if !self.form.is_return_visible() {
            self.render_text_input(frame, area, &departure);
            return;
        }

        let [depart_area, return_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        self.render_text_input(frame, depart_area, &departure);
        self.render_text_input(
            frame,
            return_area,
            &TextInput {
                field: FormField::Return,
                title: "Return",
                text: &self.return_input,
                placeholder: "YYYY-MM-DD (optional)",
                loading: false,
            },
        );
    }

    fn render_passengers_and_class(&self, frame: &mut Frame, area: Rect) {
        let [adults_area, class_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        let params = self.form.store().search_params();

        let adults_block = Block::default()
            .title(" Adults ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border(FormField::Adults));
        let adults = Line::from(vec![
            Span::styled(" − ", theme::key_hint_key()),
            Span::styled(format!(" {} ", params.adults), theme::text()),
            Span::styled(" + ", theme::key_hint_key()),
        ]);
        frame.render_widget(Paragraph::new(adults).block(adults_block), adults_area);

        let class_block = Block::default()
            .title(" Class ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border(FormField::Class));
        let class = params.flight_class.map_or_else(
            || Span::styled("Select class", theme::placeholder()),
            |c| Span::styled(c.label(), theme::text()),
        );
        let arrow = if self.form.class_menu().is_expanded() {
            " ▴"
        } else {
            " ▾"
        };
        let line = Line::from(vec![Span::raw(" "), class, Span::styled(arrow, theme::key_hint())]);
        frame.render_widget(Paragraph::new(line).block(class_block), class_area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        if self.form.is_searching() {
            let throbber = Throbber::default()
                .label(" Searching flights…")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }

        let style = if self.focused && self.field == FormField::Submit {
            theme::button()
        } else {
            theme::key_hint_key()
        };
        let button = Paragraph::new(Span::styled("  Search Flights  ", style))
            .alignment(Alignment::Center);
        frame.render_widget(button, area);
    }

    fn render_suggestions(&self, frame: &mut Frame, bounds: Rect, anchor: Rect, field: LocationField) {
        let suggestions = self.form.store().suggestions(field);
        if suggestions.is_empty() {
            return;
        }

        let rows = u16::try_from(suggestions.len())
            .unwrap_or(MAX_SUGGESTION_ROWS)
            .min(MAX_SUGGESTION_ROWS);
        let y = anchor.bottom();
        let height = (rows + 2).min(bounds.bottom().saturating_sub(y));
        if height < 3 {
            return;
        }
        let area = Rect::new(anchor.x, y, anchor.width, height);

        let items: Vec<ListItem> = suggestions
            .iter()
            .map(|s| match s.kind {
                SuggestionKind::Group => ListItem::new(Line::from(Span::styled(
                    s.display_text(),
                    theme::text().add_modifier(Modifier::BOLD),
                ))),
                SuggestionKind::Airport => ListItem::new(Line::from(vec![
                    Span::styled("  ✈ ", theme::key_hint()),
                    Span::styled(s.display_text(), theme::text()),
                ])),
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_focused())
                    .style(Style::default().bg(theme::BG_DARK)),
            )
            .highlight_style(theme::selected())
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.suggestion_cursor));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_class_menu(&self, frame: &mut Frame, bounds: Rect, anchor: Rect) {
        let menu = self.form.class_menu();
        if !menu.is_visible() {
            return;
        }

        let classes = self.form.store().cabin_classes();
        let rows = u16::try_from(classes.len()).unwrap_or(0);
        let y = anchor.bottom();
        let height = (rows + 2).min(bounds.bottom().saturating_sub(y));
        if height < 3 {
            return;
        }
        let area = Rect::new(anchor.x, y, anchor.width, height);

        let border = if menu.is_transitioning() {
            theme::transitioning()
        } else {
            theme::border_focused()
        };
        let items: Vec<ListItem> = classes
            .iter()
            .map(|c| ListItem::new(Span::styled(c.label(), theme::text())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border)
                    .style(Style::default().bg(theme::BG_DARK)),
            )
            .highlight_style(theme::selected())
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.form.class_cursor()));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Printable characters, with or without Shift.
fn is_text_key(key: KeyEvent) -> bool {
    key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT
}

impl Component for SearchScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_searching() {
            return Ok(None);
        }
        if self.form.class_menu().is_expanded() {
            return Ok(self.handle_class_menu_key(key));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
                self.form.swap();
                self.suggestion_cursor = 0;
                return Ok(None);
            }
            (_, KeyCode::Tab) => return Ok(self.move_focus(true)),
            (_, KeyCode::BackTab) => return Ok(self.move_focus(false)),
            _ => {}
        }

        if let Some(field) = self.field.location() {
            return Ok(self.handle_location_key(field, key));
        }

        let action = match (self.field, key.code) {
            (FormField::Departure | FormField::Return, _) => self.handle_date_key(key),

            (FormField::TripType, KeyCode::Right | KeyCode::Char(' ')) => {
                self.cycle_trip_type(true);
                None
            }
            (FormField::TripType, KeyCode::Left) => {
                self.cycle_trip_type(false);
                None
            }

            (FormField::Adults, KeyCode::Right | KeyCode::Char('+' | '=')) => {
                self.form.increment_adults();
                None
            }
            (FormField::Adults, KeyCode::Left | KeyCode::Char('-')) => {
                self.form.decrement_adults();
                None
            }

            (FormField::Class, KeyCode::Enter | KeyCode::Char(' ')) => {
                self.form.toggle_class_menu();
                None
            }

            (FormField::Submit, KeyCode::Enter | KeyCode::Char(' ')) => self.submit(),

            (_, KeyCode::Enter | KeyCode::Down) => self.move_focus(true),
            (_, KeyCode::Up) => self.move_focus(false),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.form.settle();
                let store = self.form.store();
                if self.form.is_searching()
                    || store.is_loading(LocationField::Origin)
                    || store.is_loading(LocationField::Destination)
                {
                    self.throbber_state.calc_next();
                }
            }
            Action::SearchCompleted { .. } if self.form.is_searching() => {
                self.form.finish_search();
                return Ok(Some(Action::SwitchScreen(ScreenId::Results)));
            }
            Action::SearchFailed(_) => self.form.finish_search(),
            Action::LookupFailed { .. } => self.suggestion_cursor = 0,
            // A fresh list invalidates the highlight
            Action::SuggestionsUpdated { field, .. } if self.field.location() == Some(*field) => {
                self.suggestion_cursor = 0;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" ✈ Search Flights ")
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

        let [
            trip_area,
            _,
            from_area,
            swap_area,
            to_area,
            dates_area,
            pax_area,
            _,
            submit_area,
            _,
        ] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.render_trip_types(frame, trip_area);
        self.render_location(frame, from_area, LocationField::Origin);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("   ⇅ ", Style::default().fg(theme::CORAL)),
                Span::styled("Ctrl+X swap", theme::key_hint()),
            ])),
            swap_area,
        );
        self.render_location(frame, to_area, LocationField::Destination);
        self.render_dates(frame, dates_area);
        self.render_passengers_and_class(frame, pax_area);
        self.render_submit(frame, submit_area);

        // Overlays last so they sit on top of the fields below them
        match self.field {
            FormField::Origin => {
                self.render_suggestions(frame, inner, from_area, LocationField::Origin);
            }
            FormField::Destination => {
                self.render_suggestions(frame, inner, to_area, LocationField::Destination);
            }
            FormField::Class => {
                let [_, class_area] =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .areas(pax_area);
                self.render_class_menu(frame, inner, class_area);
            }
            _ => {}
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.sync_dates();
        }
    }

    fn key_hints(&self) -> &'static str {
        "Tab next field  Enter select  Ctrl+X swap  F1 help  Ctrl+C quit"
    }

    fn id(&self) -> &str {
        "search"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use skyfare_core::{CabinClass, LocationSuggestion, Session, SessionConfig};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn screen() -> SearchScreen {
        let config = SessionConfig::new("http://127.0.0.1:9/api".parse().unwrap());
        let session = Session::new(config).unwrap();
        let form = SearchForm::with_today(session.autocomplete().clone(), today());
        let mut screen = SearchScreen::new(form);
        screen.set_focused(true);
        screen
    }

    fn press(screen: &mut SearchScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut SearchScreen, text: &str) -> Vec<Action> {
        text.chars()
            .filter_map(|c| press(screen, KeyCode::Char(c)))
            .collect()
    }

    fn focus(screen: &mut SearchScreen, field: FormField) {
        screen.field = field;
    }

    #[test]
    fn typing_issues_a_lookup_only_from_three_chars() {
        let mut s = screen();
        let actions = type_text(&mut s, "Par");

        assert_eq!(actions.len(), 1);
        let Some(Action::Lookup(ticket)) = actions.first() else {
            panic!("expected a lookup, got {actions:?}");
        };
        assert_eq!(ticket.keyword(), "Par");
        assert_eq!(ticket.field(), LocationField::Origin);
        assert!(s.form.store().is_loading(LocationField::Origin));
    }

    #[test]
    fn q_is_text_not_quit() {
        let mut s = screen();
        assert!(press(&mut s, KeyCode::Char('q')).is_none());
        assert_eq!(s.form.store().input(LocationField::Origin), "q");
    }

    #[test]
    fn enter_selects_highlighted_suggestion_and_advances() {
        let mut s = screen();
        type_text(&mut s, "Pa");
        s.form.store().set_suggestions(
            LocationField::Origin,
            vec![
                LocationSuggestion {
                    id: "1".into(),
                    name: "Paris".into(),
                    iata: "PAR".into(),
                    kind: SuggestionKind::Group,
                },
                LocationSuggestion {
                    id: "2".into(),
                    name: "Charles de Gaulle".into(),
                    iata: "CDG".into(),
                    kind: SuggestionKind::Airport,
                },
            ],
        );

        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);

        let store = s.form.store();
        assert_eq!(store.search_params().from.as_deref(), Some("CDG"));
        assert_eq!(store.search_params().to, None);
        assert_eq!(store.input(LocationField::Origin), "Charles de Gaulle - CDG");
        assert!(store.suggestions(LocationField::Origin).is_empty());
        assert_eq!(s.field, FormField::Destination);
    }

    #[test]
    fn new_suggestion_list_resets_highlight() {
        let mut s = screen();
        type_text(&mut s, "Pa");
        s.form.store().set_suggestions(
            LocationField::Origin,
            ["PAR", "CDG", "ORY"]
                .into_iter()
                .map(|iata| LocationSuggestion {
                    id: iata.into(),
                    name: iata.into(),
                    iata: iata.into(),
                    kind: SuggestionKind::Airport,
                })
                .collect(),
        );
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        assert_eq!(s.suggestion_cursor, 2);

        s.update(&Action::SuggestionsUpdated {
            field: LocationField::Destination,
            count: 1,
        })
        .unwrap();
        assert_eq!(s.suggestion_cursor, 2);

        s.update(&Action::SuggestionsUpdated {
            field: LocationField::Origin,
            count: 1,
        })
        .unwrap();
        assert_eq!(s.suggestion_cursor, 0);
    }

    #[test]
    fn ctrl_x_swaps_locations() {
        let mut s = screen();
        s.form
            .store()
            .update_search_params(|p| p.from = Some("JFK".into()));
        s.form.store().set_input(LocationField::Origin, "New York - JFK");

        s.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL))
            .unwrap();

        let store = s.form.store();
        assert_eq!(store.search_params().from, None);
        assert_eq!(store.search_params().to.as_deref(), Some("JFK"));
        assert_eq!(store.input(LocationField::Destination), "New York - JFK");
        assert_eq!(store.input(LocationField::Origin), "");
    }

    #[test]
    fn one_way_hides_return_from_tab_order() {
        let mut s = screen();
        focus(&mut s, FormField::TripType);
        press(&mut s, KeyCode::Right);

        assert_eq!(s.form.trip_type(), TripType::OneWay);
        assert!(!s.visible_fields().contains(&FormField::Return));

        focus(&mut s, FormField::Departure);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.field, FormField::Adults);
    }

    #[test]
    fn departure_date_commits_on_tab() {
        let mut s = screen();
        focus(&mut s, FormField::Departure);
        type_text(&mut s, "2025-05-01");
        assert!(press(&mut s, KeyCode::Tab).is_none());

        assert_eq!(
            s.form.store().search_params().departure_date,
            NaiveDate::from_ymd_opt(2025, 5, 1)
        );
        assert_eq!(s.field, FormField::Return);
    }

    #[test]
    fn past_date_keeps_focus_and_notifies() {
        let mut s = screen();
        focus(&mut s, FormField::Departure);
        type_text(&mut s, "2025-01-01");

        let action = press(&mut s, KeyCode::Tab);

        assert!(matches!(action, Some(Action::Notify(_))));
        assert_eq!(s.field, FormField::Departure);
        assert_eq!(s.form.store().search_params().departure_date, None);
    }

    #[test]
    fn adults_never_drop_below_one() {
        let mut s = screen();
        focus(&mut s, FormField::Adults);
        press(&mut s, KeyCode::Char('-'));
        press(&mut s, KeyCode::Char('-'));
        assert_eq!(s.form.store().search_params().adults, 1);

        press(&mut s, KeyCode::Char('+'));
        assert_eq!(s.form.store().search_params().adults, 2);
    }

    #[test]
    fn class_menu_selects_with_enter() {
        let mut s = screen();
        focus(&mut s, FormField::Class);
        press(&mut s, KeyCode::Enter);
        assert!(s.form.class_menu().is_expanded());

        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Enter);

        assert_eq!(
            s.form.store().search_params().flight_class,
            Some(CabinClass::Business)
        );
        assert!(!s.form.class_menu().is_expanded());
    }

    #[test]
    fn erased_departure_is_cleared_and_blocks_submit() {
        let mut s = screen();
        s.form.store().update_search_params(|p| {
            p.from = Some("JFK".into());
            p.to = Some("CDG".into());
            p.flight_class = Some(CabinClass::Economy);
        });
        focus(&mut s, FormField::Departure);
        type_text(&mut s, "2025-05-01");
        press(&mut s, KeyCode::Tab);

        focus(&mut s, FormField::Departure);
        for _ in 0..DATE_INPUT_LEN {
            press(&mut s, KeyCode::Backspace);
        }
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.form.store().search_params().departure_date, None);

        focus(&mut s, FormField::Submit);
        let Some(Action::Notify(n)) = press(&mut s, KeyCode::Enter) else {
            panic!("expected a notification");
        };
        assert!(n.message.contains("departure date"));
        assert!(!s.form.is_searching());
    }

    #[test]
    fn later_departure_clears_shown_return_date() {
        let mut s = screen();
        focus(&mut s, FormField::Departure);
        type_text(&mut s, "2025-05-01");
        press(&mut s, KeyCode::Tab);
        type_text(&mut s, "2025-05-05");
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.return_input, "2025-05-05");

        focus(&mut s, FormField::Departure);
        for _ in 0..DATE_INPUT_LEN {
            press(&mut s, KeyCode::Backspace);
        }
        type_text(&mut s, "2025-05-10");
        press(&mut s, KeyCode::Tab);

        assert_eq!(s.form.store().search_params().return_date, None);
        assert_eq!(s.return_input, "");
    }

    #[test]
    fn incomplete_form_lists_missing_fields() {
        let mut s = screen();
        focus(&mut s, FormField::Submit);

        let Some(Action::Notify(n)) = press(&mut s, KeyCode::Enter) else {
            panic!("expected a notification");
        };
        assert!(n.message.starts_with("Please fill all required fields"));
        assert!(!s.form.is_searching());
    }

    #[test]
    fn complete_form_starts_search_and_blocks_input() {
        let mut s = screen();
        s.form.store().update_search_params(|p| {
            p.from = Some("JFK".into());
            p.to = Some("CDG".into());
            p.departure_date = NaiveDate::from_ymd_opt(2025, 5, 1);
            p.flight_class = Some(CabinClass::Economy);
        });
        focus(&mut s, FormField::Submit);

        let action = press(&mut s, KeyCode::Enter);
        assert!(matches!(action, Some(Action::Search(ref p)) if p.to.as_deref() == Some("CDG")));
        assert!(s.form.is_searching());
        assert!(press(&mut s, KeyCode::Tab).is_none());
        assert_eq!(s.field, FormField::Submit);

        let next = s.update(&Action::SearchCompleted { count: 0 }).unwrap();
        assert!(matches!(next, Some(Action::SwitchScreen(ScreenId::Results))));
        assert!(!s.form.is_searching());
    }

    #[test]
    fn renders_form_labels() {
        let s = screen();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| s.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        for label in ["Search Flights", "Round Trip", "From", "To", "Departure", "Adults", "Class"] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
