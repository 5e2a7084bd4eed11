//! Calendar-free date picker: one field each for day, month and year.

use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::KeyCode;
use onboard_core::PickOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatePicker {
    date: NaiveDate,
    /// Latest selectable date, inclusive
    max: Option<NaiveDate>,
    part: DatePart,
}

impl DatePicker {
    pub fn new(initial: NaiveDate, max: Option<NaiveDate>) -> Self {
        let date = match max {
            Some(max) => initial.min(max),
            None => initial,
        };
        Self {
            date,
            max,
            part: DatePart::Day,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    pub fn part(&self) -> DatePart {
        self.part
    }

    pub fn next_part(&mut self) {
        self.part = match self.part {
            DatePart::Day => DatePart::Month,
            DatePart::Month => DatePart::Year,
            DatePart::Year => DatePart::Day,
        };
    }

    pub fn previous_part(&mut self) {
        self.part = match self.part {
            DatePart::Day => DatePart::Year,
            DatePart::Month => DatePart::Day,
            DatePart::Year => DatePart::Month,
        };
    }

    pub fn increment(&mut self) {
        self.step(true);
    }

    pub fn decrement(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        let next = match (self.part, forward) {
            (DatePart::Day, true) => self.date.checked_add_days(Days::new(1)),
            (DatePart::Day, false) => self.date.checked_sub_days(Days::new(1)),
            (DatePart::Month, true) => self.date.checked_add_months(Months::new(1)),
            (DatePart::Month, false) => self.date.checked_sub_months(Months::new(1)),
            (DatePart::Year, true) => self.date.checked_add_months(Months::new(12)),
            (DatePart::Year, false) => self.date.checked_sub_months(Months::new(12)),
        };

        if let Some(next) = next {
            self.date = match self.max {
                Some(max) if next > max => max,
                _ => next,
            };
        }
    }

    /// `None` while the picker stays open
    pub fn handle_key(&mut self, key: KeyCode) -> Option<PickOutcome<NaiveDate>> {
        match key {
            KeyCode::Up | KeyCode::Char('+') => self.increment(),
            KeyCode::Down | KeyCode::Char('-') => self.decrement(),
            KeyCode::Right | KeyCode::Tab => self.next_part(),
            KeyCode::Left | KeyCode::BackTab => self.previous_part(),
            KeyCode::Enter => return Some(PickOutcome::Picked(self.date)),
            KeyCode::Esc => return Some(PickOutcome::Cancelled),
            _ => {}
        }
        None
    }

    /// (day, month, year) labels for rendering
    pub fn parts(&self) -> [(DatePart, String); 3] {
        [
            (DatePart::Day, format!("{:02}", self.date.day())),
            (DatePart::Month, self.date.format("%b").to_string()),
            (DatePart::Year, format!("{:04}", self.date.year())),
        ]
    }
}
