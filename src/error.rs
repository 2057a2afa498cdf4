use thiserror::Error;

use crate::models::EntryField;

/// Failures raised by the entry-collection session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Input rejected outright (e.g. a non-positive entry count).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field value could not be converted to the field's type.
    #[error("cannot use {value:?} for {field}")]
    Coercion { field: EntryField, value: String },

    /// An entry operation was attempted while no entries are being collected.
    #[error("no invoice entries are being collected")]
    NotCollecting,

    /// Customer details are frozen once invoicing begins.
    #[error("customer details can only be changed before entries start")]
    CustomerLocked,
}

impl SessionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failures while turning a rendered invoice into a PDF file.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("pdf backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
