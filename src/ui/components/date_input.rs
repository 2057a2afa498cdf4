use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Keyboard date picker: digits fill the selected part, Left/Right switch parts.
#[derive(Debug, Clone)]
pub struct DateInputState {
    pub date: Option<NaiveDate>,
    pub editing: bool,
    pub date_part: DatePart,
    pub current_date_input: String,
}

impl DateInputState {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            current_date_input: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.date_part = DatePart::Year;
            self.current_date_input.clear();
            if self.date.is_none() {
                self.date = Some(Local::now().date_naive());
            }
        }
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.current_date_input.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.current_date_input.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        let Some(date) = self.date else {
            return;
        };

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.current_date_input.push(c);
                let width = if self.date_part == DatePart::Year { 4 } else { 2 };
                if self.current_date_input.len() < width {
                    return;
                }

                if let Ok(value) = self.current_date_input.parse::<u32>() {
                    let updated = match self.date_part {
                        DatePart::Year if (1900..=2100).contains(&value) => {
                            with_clamped_day(value as i32, date.month(), date.day())
                        }
                        DatePart::Month if (1..=12).contains(&value) => {
                            with_clamped_day(date.year(), value, date.day())
                        }
                        DatePart::Day => NaiveDate::from_ymd_opt(date.year(), date.month(), value),
                        _ => None,
                    };
                    if let Some(new_date) = updated {
                        self.date = Some(new_date);
                    }
                }
                self.current_date_input.clear();
            }
            KeyCode::Backspace => {
                self.current_date_input.pop();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    pub fn get_display_string(&self) -> String {
        let Some(date) = self.date else {
            return "(not set)".to_string();
        };
        let (year, month, day) = (
            format!("{:04}", date.year()),
            format!("{:02}", date.month()),
            format!("{:02}", date.day()),
        );
        if !self.editing {
            return format!("{year}-{month}-{day}");
        }

        let current_input = if !self.current_date_input.is_empty() {
            format!("[{}]", self.current_date_input)
        } else {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        };

        match self.date_part {
            DatePart::Year => format!("{year}{current_input}-{month}-{day}"),
            DatePart::Month => format!("{year}-{month}{current_input}-{day}"),
            DatePart::Day => format!("{year}-{month}-{day}{current_input}"),
        }
    }
}

// Moving from Jan 31 to February lands on the last day of February.
fn with_clamped_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}
