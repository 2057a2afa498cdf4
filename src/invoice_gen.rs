use std::fmt::Write as _;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::document::{Align, Element, InvoiceDocument, Page, TextRun, PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::{split_text_to_size, FontWeight};
use crate::models::{Customer, LineItem};
use crate::words::to_words;

pub const AGENCY_NAME: &str = "Tirupati Travels";
pub const AGENCY_ADDRESS: &str = "2/3, Tyagi Road, Prince Chowk, Dehradun (U.K.)";
pub const AGENCY_PHONE: &str = "Mob.: 9412984847, 8630207638";
pub const CURRENCY_SYMBOL: &str = "\u{20b9}";
pub const DEFAULT_DATE_FORMAT: &str = "%-d/%-m/%Y";

pub const TABLE_HEADERS: [&str; 6] = ["Car No", "Particulars", "Amount", "Days", "From", "To"];

const CENTER_X: f32 = PAGE_WIDTH / 2.0;
const TEXT_MARGIN: f32 = 15.0;
const TABLE_START_Y: f32 = 75.0;
const TABLE_MARGIN: f32 = 14.0;
const COLUMN_WIDTHS: [f32; 6] = [28.0, 52.0, 26.0, 16.0, 30.0, 30.0];
const TABLE_FONT_SIZE: f32 = 10.0;
const CELL_PADDING: f32 = 1.76;
const CELL_LINE_HEIGHT: f32 = 4.06;
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - TABLE_MARGIN;

const FOOTER_FONT_SIZE: f32 = 12.0;
const FOOTER_GAP: f32 = 10.0;
const WORDS_LINE_HEIGHT: f32 = 7.0;
const FOOTER_TOP: f32 = 20.0;

/// Bill number for a render timestamp in epoch milliseconds.
pub fn bill_no(millis: i64) -> String {
    format!("INV{millis}")
}

/// Sum of all entry amounts; amounts that do not parse count as zero.
pub fn total_amount(entries: &[LineItem]) -> f64 {
    entries.iter().map(LineItem::amount_value).fold(0.0, |acc, v| acc + v)
}

/// Total formatted for the invoice footer, e.g. `₹150.50`.
pub fn format_total(total: f64) -> String {
    format!("{CURRENCY_SYMBOL}{total:.2}")
}

/// Lays out invoices on A4 pages.
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    date_format: String,
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl InvoiceRenderer {
    pub fn new(date_format: &str) -> Self {
        Self {
            date_format: date_format.to_string(),
        }
    }

    /// Render using the current time for the bill number.
    pub fn render(&self, customer: &Customer, entries: &[LineItem]) -> InvoiceDocument {
        self.render_at(customer, entries, Utc::now().timestamp_millis())
    }

    pub fn render_at(&self, customer: &Customer, entries: &[LineItem], millis: i64) -> InvoiceDocument {
        let bill_no = bill_no(millis);
        let total = total_amount(entries);
        let words = to_words(total);

        let mut pages = Pages::new();
        self.header(pages.current(), &bill_no, customer);

        let table_bottom = self.table(&mut pages, entries);
        self.footer(&mut pages, table_bottom, total, &words);

        info!(
            bill_no = %bill_no,
            rows = entries.len(),
            pages = pages.len(),
            total,
            "invoice rendered"
        );

        InvoiceDocument {
            bill_no,
            total_amount: total,
            amount_in_words: words,
            row_count: entries.len(),
            pages: pages.into_inner(),
        }
    }

    fn header(&self, page: &mut Page, bill_no: &str, customer: &Customer) {
        page.elements.extend([
            centered(AGENCY_NAME, 15.0, 18.0),
            centered(AGENCY_ADDRESS, 22.0, 12.0),
            centered(AGENCY_PHONE, 28.0, 12.0),
            centered(&format!("Invoice - {bill_no}"), 38.0, 14.0),
            left(&format!("Customer Name: {}", customer.name), 50.0, 12.0, FontWeight::Regular),
            left(&format!("Mobile: {}", customer.mobile), 58.0, 12.0, FontWeight::Regular),
            left(&format!("Email: {}", customer.email), 66.0, 12.0, FontWeight::Regular),
        ]);
    }

    /// Draws the table and returns the y of its bottom edge on the last page.
    fn table(&self, pages: &mut Pages, entries: &[LineItem]) -> f32 {
        let header: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
        let mut segment_top = TABLE_START_Y;
        let mut y = draw_row(pages.current(), &header, segment_top, FontWeight::Bold);

        for entry in entries {
            let cells = self.cells(entry);
            if y + row_height(&cells) > BOTTOM_LIMIT {
                close_segment(pages.current(), segment_top, y);
                pages.new_page();
                segment_top = TABLE_MARGIN;
                y = draw_row(pages.current(), &header, segment_top, FontWeight::Bold);
            }
            y = draw_row(pages.current(), &cells, y, FontWeight::Regular);
        }

        close_segment(pages.current(), segment_top, y);
        y
    }

    fn cells(&self, entry: &LineItem) -> Vec<String> {
        vec![
            entry.car_number.clone(),
            entry.particulars.clone(),
            entry.amount.clone(),
            entry.number_of_days.map(|d| d.to_string()).unwrap_or_default(),
            self.format_date(entry.from_date),
            self.format_date(entry.to_date),
        ]
    }

    fn format_date(&self, date: Option<NaiveDate>) -> String {
        let Some(date) = date else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }

    fn footer(&self, pages: &mut Pages, table_bottom: f32, total: f64, words: &str) {
        let max_width = PAGE_WIDTH - TEXT_MARGIN * 2.0;
        let lines = split_text_to_size(
            &format!("In Words: {words}"),
            FontWeight::Regular,
            FOOTER_FONT_SIZE,
            max_width,
        );

        let mut final_y = table_bottom + FOOTER_GAP;
        let mut total_y = total_line_y(final_y, lines.len());
        if total_y > BOTTOM_LIMIT {
            pages.new_page();
            final_y = FOOTER_TOP;
            total_y = total_line_y(final_y, lines.len());
        }

        let page = pages.current();
        for (i, line) in lines.iter().enumerate() {
            page.elements.push(left(
                line,
                final_y + i as f32 * WORDS_LINE_HEIGHT,
                FOOTER_FONT_SIZE,
                FontWeight::Regular,
            ));
        }
        page.elements.push(left(
            &format!("Total Amount: {}", format_total(total)),
            total_y,
            FOOTER_FONT_SIZE,
            FontWeight::Bold,
        ));
    }
}

fn total_line_y(final_y: f32, word_lines: usize) -> f32 {
    final_y + word_lines as f32 * WORDS_LINE_HEIGHT + FOOTER_GAP
}

struct Pages(Vec<Page>);

impl Pages {
    fn new() -> Self {
        Self(vec![Page::default()])
    }

    fn current(&mut self) -> &mut Page {
        let last = self.0.len() - 1;
        &mut self.0[last]
    }

    fn new_page(&mut self) {
        self.0.push(Page::default());
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn into_inner(self) -> Vec<Page> {
        self.0
    }
}

fn centered(text: &str, y: f32, font_size: f32) -> Element {
    Element::Text(TextRun {
        text: text.to_string(),
        x: CENTER_X,
        y,
        font_size,
        weight: FontWeight::Regular,
        align: Align::Center,
    })
}

fn left(text: &str, y: f32, font_size: f32, weight: FontWeight) -> Element {
    Element::Text(TextRun {
        text: text.to_string(),
        x: TEXT_MARGIN,
        y,
        font_size,
        weight,
        align: Align::Left,
    })
}

fn wrap_cells(cells: &[String], weight: FontWeight) -> Vec<Vec<String>> {
    cells
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| split_text_to_size(cell, weight, TABLE_FONT_SIZE, width - 2.0 * CELL_PADDING))
        .collect()
}

fn row_height(cells: &[String]) -> f32 {
    let lines = wrap_cells(cells, FontWeight::Regular)
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(1);
    lines as f32 * CELL_LINE_HEIGHT + 2.0 * CELL_PADDING
}

/// Draws one row with its top edge at `top`; returns the bottom edge.
fn draw_row(page: &mut Page, cells: &[String], top: f32, weight: FontWeight) -> f32 {
    let wrapped = wrap_cells(cells, weight);
    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
    let bottom = top + lines as f32 * CELL_LINE_HEIGHT + 2.0 * CELL_PADDING;
    let ascent = TABLE_FONT_SIZE * 25.4 / 72.0 * 0.8;

    let mut x = TABLE_MARGIN;
    for (cell_lines, width) in wrapped.iter().zip(COLUMN_WIDTHS) {
        for (i, line) in cell_lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
            page.elements.push(Element::Text(TextRun {
                text: line.clone(),
                x: x + CELL_PADDING,
                y: top + CELL_PADDING + ascent + i as f32 * CELL_LINE_HEIGHT,
                font_size: TABLE_FONT_SIZE,
                weight,
                align: Align::Left,
            }));
        }
        x += width;
    }

    page.elements.push(Element::Rule {
        x1: TABLE_MARGIN,
        y1: bottom,
        x2: TABLE_MARGIN + COLUMN_WIDTHS.iter().sum::<f32>(),
        y2: bottom,
    });
    bottom
}

/// Top rule and column separators for the rows drawn on one page.
fn close_segment(page: &mut Page, top: f32, bottom: f32) {
    let right = TABLE_MARGIN + COLUMN_WIDTHS.iter().sum::<f32>();
    page.elements.push(Element::Rule { x1: TABLE_MARGIN, y1: top, x2: right, y2: top });

    let mut x = TABLE_MARGIN;
    page.elements.push(Element::Rule { x1: x, y1: top, x2: x, y2: bottom });
    for width in COLUMN_WIDTHS {
        x += width;
        page.elements.push(Element::Rule { x1: x, y1: top, x2: x, y2: bottom });
    }
}
