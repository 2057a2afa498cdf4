use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::{debug, info};

use crate::document::{Align, Element, InvoiceDocument, Page, TextRun, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::PdfError;
use crate::metrics::{text_width, FontWeight};

const LAYER_NAME: &str = "Layer 1";
const RULE_THICKNESS: f32 = 0.3;

/// Writes rendered invoices as PDF files into one output directory.
pub struct PdfInvoiceWriter {
    output_dir: PathBuf,
}

impl PdfInvoiceWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, PdfError> {
        let path = output_dir.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        Ok(Self {
            output_dir: path.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<bill_no>.pdf` and return its path.
    pub fn write(&self, document: &InvoiceDocument) -> Result<PathBuf, PdfError> {
        let bytes = to_pdf_bytes(document)?;
        let path = self.output_dir.join(document.file_name());

        let mut file = File::create(&path)?;
        file.write_all(&bytes)?;

        info!(path = %path.display(), bytes = bytes.len(), "invoice pdf written");
        Ok(path)
    }
}

/// Encode a rendered invoice as PDF using the builtin Helvetica faces.
pub fn to_pdf_bytes(document: &InvoiceDocument) -> Result<Vec<u8>, PdfError> {
    let title = format!("Invoice {}", document.bill_no);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Backend(format!("{e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Backend(format!("{e:?}")))?;
    let fonts = Fonts { regular, bold };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, &fonts, page);
    }
    debug!(pages = document.pages.len(), "pdf pages drawn");

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| PdfError::Backend(format!("{e:?}")))?;
    writer
        .into_inner()
        .map_err(|e| PdfError::Io(e.into_error()))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) {
    layer.set_outline_thickness(RULE_THICKNESS);

    for element in &page.elements {
        match element {
            Element::Text(run) => draw_text(layer, fonts, run),
            Element::Rule { x1, y1, x2, y2 } => layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(PAGE_HEIGHT - y1)), false),
                    (Point::new(Mm(*x2), Mm(PAGE_HEIGHT - y2)), false),
                ],
                is_closed: false,
            }),
        }
    }
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, run: &TextRun) {
    let text = winansi_text(&run.text);
    let x = match run.align {
        Align::Left => run.x,
        Align::Center => run.x - text_width(&text, run.weight, run.font_size) / 2.0,
    };
    layer.use_text(
        text,
        run.font_size,
        Mm(x),
        Mm(PAGE_HEIGHT - run.y),
        fonts.get(run.weight),
    );
}

/// The builtin fonts only cover single-byte text, and the rupee sign is not
/// part of it.
fn winansi_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{20b9}' => out.push_str("Rs."),
            ' '..='~' => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice_gen::InvoiceRenderer;
    use crate::models::{Customer, LineItem};

    fn document(rows: usize) -> InvoiceDocument {
        let customer = Customer {
            name: "Ravi Negi".to_string(),
            mobile: "9876543210".to_string(),
            email: "ravi@example.com".to_string(),
        };
        let entries: Vec<LineItem> = (0..rows)
            .map(|i| LineItem {
                car_number: format!("UK07 TB {i:04}"),
                particulars: "Local duty".to_string(),
                amount: "1200".to_string(),
                ..LineItem::default()
            })
            .collect();
        InvoiceRenderer::default().render_at(&customer, &entries, 1_700_000_000_000)
    }

    #[test]
    fn rupee_sign_is_spelled_out() {
        assert_eq!(winansi_text("Total Amount: \u{20b9}150.50"), "Total Amount: Rs.150.50");
        assert_eq!(winansi_text("caf\u{e9}"), "caf?");
    }

    #[test]
    fn produces_pdf_bytes() {
        let bytes = to_pdf_bytes(&document(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn multi_page_documents_encode() {
        let doc = document(90);
        assert!(doc.pages.len() > 1);
        let bytes = to_pdf_bytes(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn writer_creates_directory_and_names_file_after_bill() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("invoices");
        let writer = PdfInvoiceWriter::new(&out).unwrap();
        assert!(out.is_dir());

        let doc = document(1);
        let path = writer.write(&doc).unwrap();
        assert_eq!(path, out.join("INV1700000000000.pdf"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
