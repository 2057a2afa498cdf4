pub mod config;
pub mod document;
pub mod error;
pub mod invoice_gen;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pdf;
pub mod session;
pub mod ui;
pub mod words;

use std::path::PathBuf;

use tracing::{error, info};

use crate::document::InvoiceDocument;
use crate::error::PdfError;
use crate::invoice_gen::InvoiceRenderer;
use crate::models::LineItem;
use crate::pdf::PdfInvoiceWriter;
use crate::session::Session;

/// Render the completed entries, write the PDF and reset the session.
///
/// The session is reset even when writing fails so the operator can start
/// over; the error is returned alongside the rendered document.
pub fn complete_invoice(
    session: &mut Session,
    renderer: &InvoiceRenderer,
    writer: &PdfInvoiceWriter,
    entries: &[LineItem],
) -> (InvoiceDocument, Result<PathBuf, PdfError>) {
    let document = renderer.render(session.customer(), entries);
    let written = writer.write(&document);

    match &written {
        Ok(path) => info!(bill_no = %document.bill_no, path = %path.display(), "invoice complete"),
        Err(err) => error!(bill_no = %document.bill_no, error = %err, "failed to write invoice"),
    }

    session.reset();
    (document, written)
}
