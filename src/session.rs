//! Entry-collection session.
//!
//! The session walks through three phases: customer details are gathered
//! first, then a fixed number of line items are entered one at a time, and
//! finally the session reports completion with every committed item. The
//! caller renders the invoice and then calls [`Session::reset`].

use chrono::NaiveDate;
use tracing::debug;

use crate::error::SessionError;
use crate::models::{Customer, CustomerField, EntryField, FieldValue, LineItem};

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollectingCustomer,
    /// 1-indexed position of the entry being edited.
    CollectingEntry(usize),
    Complete,
}

/// Outcome of [`Session::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// More entries are expected; carries the new position.
    Next(usize),
    /// The target count was reached; carries every committed entry in order.
    Complete(Vec<LineItem>),
}

#[derive(Debug, Clone)]
pub struct Session {
    customer: Customer,
    target_count: usize,
    committed: Vec<LineItem>,
    draft: LineItem,
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            customer: Customer::default(),
            target_count: 0,
            committed: Vec::new(),
            draft: LineItem::default(),
            phase: Phase::CollectingCustomer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn committed(&self) -> &[LineItem] {
        &self.committed
    }

    pub fn draft(&self) -> &LineItem {
        &self.draft
    }

    /// Current 1-indexed position, if entries are being collected.
    pub fn position(&self) -> Option<usize> {
        match self.phase {
            Phase::CollectingEntry(position) => Some(position),
            _ => None,
        }
    }

    pub fn is_last_entry(&self) -> bool {
        self.position() == Some(self.target_count)
    }

    pub fn set_customer_field(
        &mut self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::CollectingCustomer {
            return Err(SessionError::CustomerLocked);
        }
        *self.customer.field_mut(field) = value.into();
        Ok(())
    }

    /// Begin collecting `target_count` entries.
    pub fn start(&mut self, target_count: i64) -> Result<(), SessionError> {
        if target_count <= 0 {
            return Err(SessionError::validation(format!(
                "number of entries must be at least 1, got {target_count}"
            )));
        }
        let target_count = usize::try_from(target_count)
            .map_err(|_| SessionError::validation("number of entries is too large"))?;

        self.target_count = target_count;
        self.committed.clear();
        self.draft = LineItem::default();
        self.phase = Phase::CollectingEntry(1);
        debug!(target_count, "entry collection started");
        Ok(())
    }

    /// Merge one field into the draft entry.
    pub fn update_draft(
        &mut self,
        field: EntryField,
        value: impl Into<FieldValue>,
    ) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::CollectingEntry(_)) {
            return Err(SessionError::NotCollecting);
        }

        match (field, value.into()) {
            (EntryField::CarNumber, FieldValue::Text(text)) => self.draft.car_number = text,
            (EntryField::Particulars, FieldValue::Text(text)) => self.draft.particulars = text,
            (EntryField::Amount, FieldValue::Text(text)) => self.draft.amount = text,
            (EntryField::NumberOfDays, FieldValue::Text(text)) => {
                self.draft.number_of_days = parse_days(&text).ok_or(SessionError::Coercion {
                    field,
                    value: text.clone(),
                })?;
            }
            (EntryField::FromDate, value) => self.draft.from_date = coerce_date(field, value)?,
            (EntryField::ToDate, value) => self.draft.to_date = coerce_date(field, value)?,
            (field, FieldValue::Date(date)) => {
                return Err(SessionError::Coercion {
                    field,
                    value: date.map(|d| d.to_string()).unwrap_or_default(),
                });
            }
        }
        Ok(())
    }

    /// Commit the draft and move to the next position.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let Phase::CollectingEntry(position) = self.phase else {
            return Err(SessionError::NotCollecting);
        };

        self.committed.push(std::mem::take(&mut self.draft));
        let next = position + 1;

        if next > self.target_count {
            self.phase = Phase::Complete;
            debug!(entries = self.committed.len(), "entry collection complete");
            Ok(Advance::Complete(self.committed.clone()))
        } else {
            self.phase = Phase::CollectingEntry(next);
            debug!(position = next, target = self.target_count, "advanced to next entry");
            Ok(Advance::Next(next))
        }
    }

    /// Drop everything and go back to collecting customer details.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// Outer None means the text is not a day count; inner None means "unset".
fn parse_days(text: &str) -> Option<Option<u32>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(None);
    }
    text.parse::<u32>().ok().map(Some)
}

fn coerce_date(field: EntryField, value: FieldValue) -> Result<Option<NaiveDate>, SessionError> {
    match value {
        FieldValue::Date(date) => Ok(date),
        FieldValue::Text(text) if text.trim().is_empty() => Ok(None),
        FieldValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| SessionError::Coercion { field, value: text }),
    }
}
