use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{info, warn};
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::models::CustomerField;
use crate::session::Session;
use crate::ui::{render_error, render_header, render_help, screen_chunks};

pub enum CustomerFormAction {
    Quit,
    Started,
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum FormField {
    Name,
    Mobile,
    Email,
    Entries,
}

const FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::Mobile,
    FormField::Email,
    FormField::Entries,
];

impl FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Customer Name",
            FormField::Mobile => "Mobile Number",
            FormField::Email => "Email",
            FormField::Entries => "Number of Entries",
        }
    }

    fn customer_field(self) -> Option<CustomerField> {
        match self {
            FormField::Name => Some(CustomerField::Name),
            FormField::Mobile => Some(CustomerField::Mobile),
            FormField::Email => Some(CustomerField::Email),
            FormField::Entries => None,
        }
    }
}

pub struct CustomerFormState {
    pub current_field: FormField,
    pub editing: bool,
    pub entries_input: String,
    pub show_error: Option<String>,
}

impl Default for CustomerFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerFormState {
    pub fn new() -> Self {
        Self {
            current_field: FormField::Name,
            editing: false,
            entries_input: String::new(),
            show_error: None,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::Mobile,
            FormField::Mobile => FormField::Email,
            FormField::Email => FormField::Entries,
            FormField::Entries => FormField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::Entries,
            FormField::Mobile => FormField::Name,
            FormField::Email => FormField::Mobile,
            FormField::Entries => FormField::Email,
        };
    }

    fn value<'a>(&'a self, session: &'a Session, field: FormField) -> &'a str {
        let customer = session.customer();
        match field {
            FormField::Name => &customer.name,
            FormField::Mobile => &customer.mobile,
            FormField::Email => &customer.email,
            FormField::Entries => &self.entries_input,
        }
    }

    pub fn edit_current_field(&mut self, session: &mut Session, key: KeyCode) -> Result<()> {
        if !self.editing {
            return Ok(());
        }

        let Some(field) = self.current_field.customer_field() else {
            match key {
                KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && self.entries_input.is_empty()) => {
                    self.entries_input.push(c)
                }
                KeyCode::Backspace => {
                    self.entries_input.pop();
                }
                _ => {}
            }
            return Ok(());
        };

        let mut value = self.value(session, self.current_field).to_string();
        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return Ok(()),
        }
        session.set_customer_field(field, value)?;
        Ok(())
    }

    /// Validate the form and start entry collection.
    pub fn submit(&mut self, session: &mut Session) -> bool {
        if !session.customer().is_complete() {
            self.show_error = Some("Customer name, mobile and email are required.".to_string());
            return false;
        }

        let count = match self.entries_input.trim().parse::<i64>() {
            Ok(count) => count,
            Err(_) => {
                self.show_error = Some("Number of entries must be a whole number.".to_string());
                return false;
            }
        };

        match session.start(count) {
            Ok(()) => {
                info!(customer = %session.customer().name, entries = count, "invoice started");
                true
            }
            Err(err) => {
                warn!(error = %err, "could not start invoice");
                self.show_error = Some(err.to_string());
                false
            }
        }
    }
}

pub fn render_customer_form<B: Backend>(f: &mut Frame<B>, state: &CustomerFormState, session: &Session) {
    let chunks = screen_chunks(f.size());
    render_header(f, chunks[0]);
    render_form(f, state, session, chunks[1]);

    let help_text = if state.editing {
        "Enter - Save field | Esc - Cancel editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Start entries | Esc - Quit"
    };
    render_help(f, chunks[2], help_text);

    if let Some(error) = &state.show_error {
        render_error(f, error);
    }
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &CustomerFormState, session: &Session, area: Rect) {
    let items: Vec<ListItem> = FIELDS
        .iter()
        .map(|&field| {
            let name = field.label();
            let value = state.value(session, field);
            let selected = field == state.current_field;

            let content = if selected && state.editing {
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{}|", value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                let style = if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.to_string()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Customer Information"));

    f.render_widget(form_list, area);
}

pub fn handle_key(
    state: &mut CustomerFormState,
    session: &mut Session,
    key: KeyCode,
) -> Result<Option<CustomerFormAction>> {
    // Any key dismisses a pending error
    if state.show_error.take().is_some() {
        return Ok(None);
    }

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Ok(Some(CustomerFormAction::Quit));
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down if !state.editing => state.next_field(),
        KeyCode::Char('s') | KeyCode::Char('S') if !state.editing => {
            if state.submit(session) {
                return Ok(Some(CustomerFormAction::Started));
            }
        }
        _ if state.editing => state.edit_current_field(session, key)?,
        _ => {}
    }

    Ok(None)
}

pub fn handle_input(state: &mut CustomerFormState, session: &mut Session) -> Result<Option<CustomerFormAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return handle_key(state, session, key.code);
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;

    fn type_text(state: &mut CustomerFormState, session: &mut Session, text: &str) {
        handle_key(state, session, KeyCode::Enter).unwrap();
        for c in text.chars() {
            handle_key(state, session, KeyCode::Char(c)).unwrap();
        }
        handle_key(state, session, KeyCode::Enter).unwrap();
    }

    fn fill(state: &mut CustomerFormState, session: &mut Session, entries: &str) {
        for text in ["A", "1", "a@b.com", entries] {
            type_text(state, session, text);
            handle_key(state, session, KeyCode::Down).unwrap();
        }
    }

    #[test]
    fn filled_form_starts_the_session() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        fill(&mut state, &mut session, "2");

        let action = handle_key(&mut state, &mut session, KeyCode::Char('s')).unwrap();
        assert!(matches!(action, Some(CustomerFormAction::Started)));
        assert_eq!(session.phase(), Phase::CollectingEntry(1));
        assert_eq!(session.target_count(), 2);
        assert_eq!(session.customer().email, "a@b.com");
    }

    #[test]
    fn zero_entries_are_rejected() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        fill(&mut state, &mut session, "0");

        let action = handle_key(&mut state, &mut session, KeyCode::Char('s')).unwrap();
        assert!(action.is_none());
        assert!(state.show_error.is_some());
        assert_eq!(session.phase(), Phase::CollectingCustomer);
    }

    #[test]
    fn missing_customer_details_are_rejected() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        state.entries_input = "3".to_string();

        handle_key(&mut state, &mut session, KeyCode::Char('s')).unwrap();
        assert!(state.show_error.is_some());

        // The next key only dismisses the error
        handle_key(&mut state, &mut session, KeyCode::Esc).unwrap();
        assert!(state.show_error.is_none());
    }

    #[test]
    fn entries_field_only_takes_digits() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        state.current_field = FormField::Entries;
        type_text(&mut state, &mut session, "1x2");
        assert_eq!(state.entries_input, "12");
    }

    #[test]
    fn backspace_edits_customer_field() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        handle_key(&mut state, &mut session, KeyCode::Enter).unwrap();
        for key in [KeyCode::Char('A'), KeyCode::Char('b'), KeyCode::Backspace] {
            handle_key(&mut state, &mut session, key).unwrap();
        }
        assert_eq!(session.customer().name, "A");
    }

    #[test]
    fn escape_quits_when_not_editing() {
        let mut state = CustomerFormState::new();
        let mut session = Session::new();
        let action = handle_key(&mut state, &mut session, KeyCode::Esc).unwrap();
        assert!(matches!(action, Some(CustomerFormAction::Quit)));
    }
}
