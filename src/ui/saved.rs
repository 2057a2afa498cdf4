use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tui::{
    backend::Backend,
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::{render_header, render_help, screen_chunks};

pub enum SavedAction {
    NewInvoice,
    Quit,
}

/// Outcome of the last invoice, shown until the next key press.
pub struct SavedState {
    pub bill_no: String,
    pub total: String,
    pub amount_in_words: String,
    pub outcome: Result<String, String>,
}

pub fn render_saved<B: Backend>(frame: &mut Frame<B>, state: &SavedState) {
    let chunks = screen_chunks(frame.size());
    render_header(frame, chunks[0]);

    let (status, color) = match &state.outcome {
        Ok(path) => (format!("Saved to {path}"), Color::Green),
        Err(err) => (format!("Could not save the PDF: {err}"), Color::Red),
    };

    let body = Paragraph::new(vec![
        Spans::from(format!("Invoice - {}", state.bill_no)),
        Spans::from(""),
        Spans::from(format!("In Words: {}", state.amount_in_words)),
        Spans::from(format!("Total Amount: {}", state.total)),
        Spans::from(""),
        Spans::from(status),
    ])
    .style(Style::default().fg(color))
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Invoice").borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    render_help(frame, chunks[2], "Any key - New invoice | Esc - Quit");
}

pub fn handle_key(key: KeyCode) -> SavedAction {
    match key {
        KeyCode::Esc => SavedAction::Quit,
        _ => SavedAction::NewInvoice,
    }
}

pub fn handle_input() -> Result<Option<SavedAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(Some(handle_key(key.code)));
        }
    }

    Ok(None)
}
