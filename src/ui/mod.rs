pub mod components;
pub mod customer_form;
pub mod entry_wizard;
pub mod saved;

use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::invoice_gen::{AGENCY_ADDRESS, AGENCY_NAME, AGENCY_PHONE};

/// Title, body and help rows shared by every screen.
pub fn screen_chunks(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(5), // Agency header
                Constraint::Min(10),   // Form
                Constraint::Length(3), // Help
            ]
            .as_ref(),
        )
        .split(area)
}

pub fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let header = Paragraph::new(vec![
        Spans::from(AGENCY_NAME),
        Spans::from(AGENCY_ADDRESS),
        Spans::from(AGENCY_PHONE),
    ])
    .style(Style::default().fg(Color::Cyan))
    .alignment(tui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

pub fn render_help<B: Backend>(frame: &mut Frame<B>, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

pub fn render_error<B: Backend>(frame: &mut Frame<B>, error: &str) {
    let popup_area = centered_rect(60, 20, frame.size());

    let error_msg = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(error),
        Spans::from(""),
        Spans::from("Press any key to continue"),
    ])
    .block(Block::default().title("Error").borders(Borders::ALL))
    .style(Style::default().fg(Color::Red));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(error_msg, popup_area);
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
