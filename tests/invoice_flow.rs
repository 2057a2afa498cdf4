use chrono::NaiveDate;
use travel_invoice::{
    complete_invoice,
    invoice_gen::InvoiceRenderer,
    models::{CustomerField, EntryField},
    pdf::PdfInvoiceWriter,
    session::{Advance, Phase, Session},
};

fn fill_draft(session: &mut Session, car: &str, amount: &str) {
    session.update_draft(EntryField::CarNumber, car).unwrap();
    session.update_draft(EntryField::Particulars, "Outstation").unwrap();
    session.update_draft(EntryField::Amount, amount).unwrap();
    session.update_draft(EntryField::NumberOfDays, "1").unwrap();
    session
        .update_draft(EntryField::FromDate, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap())
        .unwrap();
    session.update_draft(EntryField::ToDate, "2025-04-11").unwrap();
}

#[test]
fn two_entries_produce_a_saved_invoice() {
    let dir = tempfile::tempdir().unwrap();
    let writer = PdfInvoiceWriter::new(dir.path()).unwrap();
    let renderer = InvoiceRenderer::default();

    let mut session = Session::new();
    session.set_customer_field(CustomerField::Name, "A").unwrap();
    session.set_customer_field(CustomerField::Mobile, "1").unwrap();
    session.set_customer_field(CustomerField::Email, "a@b.com").unwrap();
    session.start(2).unwrap();

    fill_draft(&mut session, "UK07 AA 0001", "100");
    assert_eq!(session.advance().unwrap(), Advance::Next(2));

    fill_draft(&mut session, "UK07 AA 0002", "50.5");
    let Advance::Complete(entries) = session.advance().unwrap() else {
        panic!("second advance should complete");
    };
    assert_eq!(entries.len(), 2);

    let (document, written) = complete_invoice(&mut session, &renderer, &writer, &entries);

    assert_eq!(document.total_amount, 150.5);
    assert_eq!(document.amount_in_words, "One Hundred Fifty Rupees Only");
    assert!(document.find_text("Total Amount: \u{20b9}150.50").is_some());
    assert!(document.find_text("Customer Name: A").is_some());
    assert!(document.bill_no.starts_with("INV"));
    assert!(document.bill_no[3..].chars().all(|c| c.is_ascii_digit()));

    let path = written.unwrap();
    assert_eq!(path, dir.path().join(format!("{}.pdf", document.bill_no)));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    assert_eq!(session.phase(), Phase::CollectingCustomer);
    assert!(session.committed().is_empty());
    assert_eq!(session.customer().name, "");
}

#[test]
fn session_resets_even_when_the_write_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let writer = PdfInvoiceWriter::new(&out).unwrap();
    std::fs::remove_dir(&out).unwrap();

    let mut session = Session::new();
    session.start(1).unwrap();
    fill_draft(&mut session, "UK07 AA 0003", "75");
    let Advance::Complete(entries) = session.advance().unwrap() else {
        panic!("single entry should complete");
    };

    let (document, written) = complete_invoice(&mut session, &InvoiceRenderer::default(), &writer, &entries);
    assert_eq!(document.total_amount, 75.0);
    assert!(written.is_err());
    assert_eq!(session.phase(), Phase::CollectingCustomer);
}
