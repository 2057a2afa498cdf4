//! Laid-out invoice, independent of any output format.
//!
//! Coordinates are millimetres on an A4 page measured from the top-left
//! corner, with `y` naming the text baseline.

use crate::metrics::FontWeight;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub weight: FontWeight,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    /// Straight rule from `(x1, y1)` to `(x2, y2)`.
    Rule { x1: f32, y1: f32, x2: f32, y2: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(run) => Some(run),
            Element::Rule { .. } => None,
        })
    }

    pub fn find_text(&self, needle: &str) -> Option<&TextRun> {
        self.texts().find(|run| run.text.contains(needle))
    }
}

/// A rendered invoice ready to be handed to a writer.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub bill_no: String,
    pub total_amount: f64,
    pub amount_in_words: String,
    pub row_count: usize,
    pub pages: Vec<Page>,
}

impl InvoiceDocument {
    /// Suggested output file name, `<bill_no>.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.bill_no)
    }

    pub fn find_text(&self, needle: &str) -> Option<&TextRun> {
        self.pages.iter().find_map(|page| page.find_text(needle))
    }
}
