use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{EntryField, FieldValue, LineItem};
use crate::session::{Advance, Session};
use crate::ui::components::date_input::DateInputState;
use crate::ui::{render_error, render_header, render_help, screen_chunks};

pub enum EntryWizardAction {
    Cancel,
    Complete(Vec<LineItem>),
}

pub struct EntryWizardState {
    current_field: EntryField,
    editing: bool,
    active_input: String,
    show_error: Option<String>,
    from_date_state: DateInputState,
    to_date_state: DateInputState,
}

impl Default for EntryWizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryWizardState {
    pub fn new() -> Self {
        Self {
            current_field: EntryField::CarNumber,
            editing: false,
            active_input: String::new(),
            show_error: None,
            from_date_state: DateInputState::new(None),
            to_date_state: DateInputState::new(None),
        }
    }

    pub fn current_field(&self) -> EntryField {
        self.current_field
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn error(&self) -> Option<&str> {
        self.show_error.as_deref()
    }

    fn date_state(&mut self, field: EntryField) -> Option<&mut DateInputState> {
        match field {
            EntryField::FromDate => Some(&mut self.from_date_state),
            EntryField::ToDate => Some(&mut self.to_date_state),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        let index = EntryField::ALL.iter().position(|f| *f == self.current_field).unwrap_or(0);
        self.current_field = EntryField::ALL[(index + 1) % EntryField::ALL.len()];
    }

    pub fn previous_field(&mut self) {
        let len = EntryField::ALL.len();
        let index = EntryField::ALL.iter().position(|f| *f == self.current_field).unwrap_or(0);
        self.current_field = EntryField::ALL[(index + len - 1) % len];
    }

    fn begin_editing(&mut self, draft: &LineItem) {
        self.editing = true;
        let field = self.current_field;
        if let Some(date_state) = self.date_state(field) {
            date_state.toggle_editing();
            return;
        }
        self.active_input = match field {
            EntryField::CarNumber => draft.car_number.clone(),
            EntryField::Particulars => draft.particulars.clone(),
            EntryField::Amount => draft.amount.clone(),
            EntryField::NumberOfDays => draft.number_of_days.map(|d| d.to_string()).unwrap_or_default(),
            EntryField::FromDate | EntryField::ToDate => String::new(),
        };
    }

    fn cancel_editing(&mut self) {
        self.editing = false;
        self.active_input.clear();
        self.from_date_state.editing = false;
        self.to_date_state.editing = false;
    }

    /// Push the edited value into the session draft.
    fn commit_field(&mut self, session: &mut Session) {
        let field = self.current_field;
        let value = match self.date_state(field) {
            Some(date_state) => FieldValue::Date(date_state.date),
            None => FieldValue::Text(self.active_input.trim().to_string()),
        };

        match session.update_draft(field, value) {
            Ok(()) => {
                self.cancel_editing();
                self.next_field();
            }
            Err(err) => self.show_error = Some(err.to_string()),
        }
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field = self.current_field;
        if let Some(date_state) = self.date_state(field) {
            date_state.handle_input(key);
            return;
        }

        match key {
            KeyCode::Char(c) => {
                let accepted = match field {
                    EntryField::Amount => {
                        c.is_ascii_digit() || (c == '.' && !self.active_input.contains('.'))
                    }
                    EntryField::NumberOfDays => c.is_ascii_digit(),
                    _ => true,
                };
                if accepted {
                    self.active_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.active_input.pop();
            }
            _ => {}
        }
    }

    /// Commit the draft, or explain which fields are still empty.
    fn advance(&mut self, session: &mut Session) -> Result<Option<EntryWizardAction>> {
        let missing = missing_fields(session.draft());
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            self.show_error = Some(format!("Please fill in: {}", names.join(", ")));
            return Ok(None);
        }

        match session.advance()? {
            Advance::Next(position) => {
                debug!(position, "entry saved");
                *self = Self::new();
                Ok(None)
            }
            Advance::Complete(entries) => Ok(Some(EntryWizardAction::Complete(entries))),
        }
    }
}

/// Fields of `draft` that are still empty.
pub fn missing_fields(draft: &LineItem) -> Vec<EntryField> {
    EntryField::ALL
        .into_iter()
        .filter(|field| match field {
            EntryField::CarNumber => draft.car_number.trim().is_empty(),
            EntryField::Particulars => draft.particulars.trim().is_empty(),
            EntryField::Amount => draft.amount.trim().is_empty(),
            EntryField::NumberOfDays => draft.number_of_days.is_none(),
            EntryField::FromDate => draft.from_date.is_none(),
            EntryField::ToDate => draft.to_date.is_none(),
        })
        .collect()
}

pub fn render_entry_wizard<B: Backend>(frame: &mut Frame<B>, state: &EntryWizardState, session: &Session) {
    let chunks = screen_chunks(frame.size());
    render_header(frame, chunks[0]);
    render_form(frame, state, session, chunks[1]);

    let help_text = match (state.editing, state.current_field.is_date()) {
        (true, true) => "Enter - Save date | Left/Right - Switch date part | Esc - Cancel editing",
        (true, false) => "Enter - Save field | Esc - Cancel editing",
        (false, _) if session.is_last_entry() => {
            "Enter - Edit field | Up/Down - Navigate | S - Submit & Save PDF | Esc - Abandon invoice"
        }
        (false, _) => "Enter - Edit field | Up/Down - Navigate | S - Next entry | Esc - Abandon invoice",
    };
    render_help(frame, chunks[2], help_text);

    if let Some(error) = &state.show_error {
        render_error(frame, error);
    }
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &EntryWizardState, session: &Session, area: Rect) {
    let title = format!(
        "Entry {} of {}",
        session.position().unwrap_or(session.target_count()),
        session.target_count()
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); EntryField::ALL.len()])
        .split(inner);

    let draft = session.draft();
    for (field, row) in EntryField::ALL.iter().zip(rows) {
        let selected = *field == state.current_field;
        let label_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let value = if selected && state.editing {
            match field {
                EntryField::FromDate => state.from_date_state.get_display_string(),
                EntryField::ToDate => state.to_date_state.get_display_string(),
                _ => format!("{}|", state.active_input),
            }
        } else {
            draft_value(draft, *field)
        };
        let value_style = if selected && state.editing {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(Spans::from(vec![
            Span::styled(format!("{}: ", field.label()), label_style),
            Span::styled(value, value_style),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, row);
    }
}

fn draft_value(draft: &LineItem, field: EntryField) -> String {
    match field {
        EntryField::CarNumber => draft.car_number.clone(),
        EntryField::Particulars => draft.particulars.clone(),
        EntryField::Amount => draft.amount.clone(),
        EntryField::NumberOfDays => draft.number_of_days.map(|d| d.to_string()).unwrap_or_default(),
        EntryField::FromDate => draft.from_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        EntryField::ToDate => draft.to_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
    }
}

pub fn handle_key(
    state: &mut EntryWizardState,
    session: &mut Session,
    key: KeyCode,
) -> Result<Option<EntryWizardAction>> {
    if state.show_error.take().is_some() {
        return Ok(None);
    }

    match key {
        KeyCode::Esc => {
            if state.editing {
                state.cancel_editing();
            } else {
                return Ok(Some(EntryWizardAction::Cancel));
            }
        }
        KeyCode::Enter | KeyCode::Tab if state.editing => state.commit_field(session),
        KeyCode::Enter => state.begin_editing(session.draft()),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') | KeyCode::Char('S') if !state.editing => return state.advance(session),
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    Ok(None)
}

pub fn handle_input(state: &mut EntryWizardState, session: &mut Session) -> Result<Option<EntryWizardAction>> {
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

    fn started(target: i64) -> Session {
        let mut session = Session::new();
        session.start(target).unwrap();
        session
    }

    fn press(state: &mut EntryWizardState, session: &mut Session, keys: &[KeyCode]) -> Option<EntryWizardAction> {
        let mut last = None;
        for key in keys {
            last = handle_key(state, session, *key).unwrap();
        }
        last
    }

    // Date parts are separated with U+2192, which stands for the Right arrow key.
    fn key_for(c: char) -> KeyCode {
        if c == '\u{2192}' { KeyCode::Right } else { KeyCode::Char(c) }
    }

    fn type_field(state: &mut EntryWizardState, session: &mut Session, text: &str) {
        let mut keys = vec![KeyCode::Enter];
        keys.extend(text.chars().map(key_for));
        keys.push(KeyCode::Enter);
        press(state, session, &keys);
    }

    fn fill_entry(state: &mut EntryWizardState, session: &mut Session, amount: &str) {
        for text in [
            "UK07 TA 4521",
            "Haridwar round trip",
            amount,
            "2",
            "2025\u{2192}03\u{2192}01",
            "2025\u{2192}03\u{2192}02",
        ] {
            type_field(state, session, text);
        }
    }

    #[test]
    fn typed_fields_reach_the_draft() {
        let mut state = EntryWizardState::new();
        let mut session = started(1);
        type_field(&mut state, &mut session, "UK07 TA 4521");
        assert_eq!(session.draft().car_number, "UK07 TA 4521");
        assert_eq!(state.current_field(), EntryField::Particulars);
    }

    #[test]
    fn amount_ignores_letters() {
        let mut state = EntryWizardState::new();
        let mut session = started(1);
        state.current_field = EntryField::Amount;
        type_field(&mut state, &mut session, "1a2.5");
        assert_eq!(session.draft().amount, "12.5");
    }

    #[test]
    fn amount_takes_a_single_decimal_point() {
        let mut state = EntryWizardState::new();
        let mut session = started(1);
        state.current_field = EntryField::Amount;
        type_field(&mut state, &mut session, "1.2.3");
        assert_eq!(session.draft().amount, "1.23");
    }

    #[test]
    fn incomplete_entry_is_not_advanced() {
        let mut state = EntryWizardState::new();
        let mut session = started(2);
        type_field(&mut state, &mut session, "UK07 TA 4521");

        let action = press(&mut state, &mut session, &[KeyCode::Char('s')]);
        assert!(action.is_none());
        assert!(state.error().unwrap().contains("Particulars"));
        assert_eq!(session.position(), Some(1));
    }

    #[test]
    fn dates_are_entered_with_the_date_widget() {
        let mut state = EntryWizardState::new();
        let mut session = started(1);
        state.current_field = EntryField::FromDate;

        type_field(&mut state, &mut session, "2025\u{2192}03\u{2192}01");

        assert_eq!(session.draft().from_date, chrono::NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(state.current_field(), EntryField::ToDate);
    }

    #[test]
    fn last_entry_completes_with_every_item() {
        let mut state = EntryWizardState::new();
        let mut session = started(2);

        for (position, amount) in [(1, "100"), (2, "50.5")] {
            assert_eq!(session.position(), Some(position));
            fill_entry(&mut state, &mut session, amount);
            assert!(missing_fields(session.draft()).is_empty());

            let action = press(&mut state, &mut session, &[KeyCode::Char('s')]);
            if position == 1 {
                assert!(action.is_none());
                assert_eq!(state.current_field(), EntryField::CarNumber);
            } else {
                let Some(EntryWizardAction::Complete(entries)) = action else {
                    panic!("expected completion");
                };
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1].amount, "50.5");
            }
        }
        assert_eq!(session.phase(), Phase::Complete);
    }

    #[test]
    fn escape_cancels_editing_before_abandoning() {
        let mut state = EntryWizardState::new();
        let mut session = started(1);
        press(&mut state, &mut session, &[KeyCode::Enter, KeyCode::Char('x')]);
        assert!(state.is_editing());

        assert!(press(&mut state, &mut session, &[KeyCode::Esc]).is_none());
        assert!(!state.is_editing());
        assert_eq!(session.draft().car_number, "");

        let action = press(&mut state, &mut session, &[KeyCode::Esc]);
        assert!(matches!(action, Some(EntryWizardAction::Cancel)));
    }

    #[test]
    fn missing_fields_lists_everything_for_an_empty_draft() {
        assert_eq!(missing_fields(&LineItem::default()), EntryField::ALL.to_vec());
    }
}
