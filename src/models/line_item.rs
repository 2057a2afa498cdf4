use chrono::NaiveDate;

/// One billable vehicle-usage row.
///
/// `amount` keeps the text exactly as it was entered; it is only parsed when
/// the invoice total is computed, so a bad value costs that row its amount
/// and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub car_number: String,
    pub particulars: String,
    pub amount: String,
    pub number_of_days: Option<u32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryField {
    CarNumber,
    Particulars,
    Amount,
    NumberOfDays,
    FromDate,
    ToDate,
}

impl EntryField {
    pub const ALL: [EntryField; 6] = [
        EntryField::CarNumber,
        EntryField::Particulars,
        EntryField::Amount,
        EntryField::NumberOfDays,
        EntryField::FromDate,
        EntryField::ToDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EntryField::CarNumber => "Car Number",
            EntryField::Particulars => "Particulars",
            EntryField::Amount => "Amount",
            EntryField::NumberOfDays => "Number of Days",
            EntryField::FromDate => "From Date",
            EntryField::ToDate => "To Date",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, EntryField::FromDate | EntryField::ToDate)
    }
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw value coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(Option<NaiveDate>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(Some(value))
    }
}

impl LineItem {
    /// Amount as a number. Empty, malformed and non-finite input all count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_amount(amount: &str) -> LineItem {
        LineItem {
            amount: amount.to_string(),
            ..LineItem::default()
        }
    }

    #[test]
    fn amount_value_parses_decimal_text() {
        assert_eq!(with_amount("50.5").amount_value(), 50.5);
        assert_eq!(with_amount(" 100 ").amount_value(), 100.0);
    }

    #[test]
    fn amount_value_falls_back_to_zero() {
        assert_eq!(with_amount("").amount_value(), 0.0);
        assert_eq!(with_amount("abc").amount_value(), 0.0);
        assert_eq!(with_amount("inf").amount_value(), 0.0);
        assert_eq!(with_amount("NaN").amount_value(), 0.0);
    }
}
