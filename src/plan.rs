//! Yearly reading plan.
//!
//! The plan is a JSON array indexed by day of year; each entry is a list of
//! reading-range strings such as `"Genesis 1-2"` or `"1 Kings 2:3-4"`.
//! Index 0 is a padding entry so that day 1 (January 1) indexes directly.
//!
//! Leap years are folded: February 29 maps to the same plan day as
//! February 28, and every later date keeps its non-leap index, so one
//! 365-day plan serves every year.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors that can occur while loading a reading plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to open plan file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid plan JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Empty reading plan")]
    EmptyPlan,
}

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// A loaded yearly reading plan.
#[derive(Debug, Clone)]
pub struct ReadingPlan {
    days: Vec<Vec<String>>,
}

impl ReadingPlan {
    /// Loads a plan from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Parses a plan from JSON text.
    ///
    /// Entries may be `null` (padding, days without readings); those lookup
    /// as absent.
    pub fn parse(content: &str) -> PlanResult<Self> {
        let days: Vec<Option<Vec<String>>> = serde_json::from_str(content)?;
        if days.is_empty() {
            return Err(PlanError::EmptyPlan);
        }
        Ok(Self {
            days: days.into_iter().map(Option::unwrap_or_default).collect(),
        })
    }

    /// Returns the reading ranges for a 1-based day of year.
    pub fn readings_for(&self, day_of_year: usize) -> Option<&[String]> {
        match self.days.get(day_of_year) {
            Some(ranges) if !ranges.is_empty() => Some(ranges),
            _ => None,
        }
    }

    /// Returns the comma-joined verses string for a date, the form the
    /// verse API expects.
    pub fn verses_string_for(&self, date: NaiveDate) -> Option<String> {
        self.readings_for(day_of_year(date)).map(|r| r.join(","))
    }
}

/// True for leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 1-based day of year with leap folding.
///
/// In leap years, February 29 and every later date are shifted down by one
/// so they match their non-leap plan day.
pub fn day_of_year(date: NaiveDate) -> usize {
    let mut day = date.ordinal() as usize;
    if is_leap_year(date.year()) && (date.month() > 2 || (date.month() == 2 && date.day() == 29)) {
        day -= 1;
    }
    day
}

/// Extracts unique book names from a comma-separated verses string,
/// preserving first-seen order.
///
/// A range like `"1 Kings 2:3-4"` yields `"1 Kings"`; a chapter range like
/// `"Song of Solomon 2-3"` yields `"Song of Solomon"`.
pub fn extract_unique_books(verses_string: &str) -> Vec<String> {
    let mut books: Vec<String> = Vec::new();
    for range in verses_string.split(',') {
        let trimmed = range.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(book) = book_of_range(trimmed) {
            if !books.iter().any(|b| b == book) {
                books.push(book.to_string());
            }
        }
    }
    books
}

/// The book-name prefix of one reading range, or `None` if the range has no
/// chapter part at all.
fn book_of_range(range: &str) -> Option<&str> {
    // "Genesis 1:3-10" — cut at the chapter number before the first colon.
    if let Some(colon) = range.find(':') {
        let head = range[..colon].trim_end_matches(|c: char| c.is_ascii_digit());
        let head = head.trim_end();
        if !head.is_empty() {
            return Some(head);
        }
    }
    // "Genesis 1-2" — everything before the last space.
    range.rfind(' ').map(|i| range[..i].trim_end())
}
