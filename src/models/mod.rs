mod customer;
mod line_item;

pub use customer::{Customer, CustomerField};
pub use line_item::{EntryField, FieldValue, LineItem};
