//! Calendar-to-relative date window normalization.
//!
//! The reports service addresses time as whole-day offsets measured backward
//! from "yesterday", its cohort boundary. A calendar range like
//! `2024-01-01/2024-01-31` becomes an encoding such as `-45d:-15d`.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Errors from window normalization.
#[derive(Error, Debug)]
pub enum WindowError {
    /// A bound falls after the reporting boundary. The service encoding is
    /// magnitude-only, so a future date would alias an equally-distant past
    /// date; we reject it instead.
    #[error("date {date} is after the reporting boundary {boundary}")]
    FutureDate {
        date: NaiveDate,
        boundary: NaiveDate,
    },
}

/// A user-supplied calendar date range.
///
/// Bound order is passed through as given; the service accepts either
/// orientation and this type does not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Normalize both bounds against `today`.
    ///
    /// The reference point is `yesterday = today - 1 day`; each bound becomes
    /// the number of whole days it lies before that point. `FutureDate` is
    /// returned for any bound past the boundary.
    pub fn normalize(&self, today: NaiveDate) -> Result<RelativeWindow, WindowError> {
        let boundary = today - Duration::days(1);
        Ok(RelativeWindow {
            start_offset_days: days_before(self.start, boundary)?,
            end_offset_days: days_before(self.end, boundary)?,
        })
    }
}

fn days_before(date: NaiveDate, boundary: NaiveDate) -> Result<i64, WindowError> {
    let days = boundary.signed_duration_since(date).num_days();
    if days < 0 {
        return Err(WindowError::FutureDate { date, boundary });
    }
    Ok(days)
}

/// A normalized window in the service's backward-offset encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeWindow {
    pub start_offset_days: i64,
    pub end_offset_days: i64,
}

impl RelativeWindow {
    /// Render the `date_period` query value, e.g. `-30d:-0d`.
    pub fn as_date_period(&self) -> String {
        format!("-{}d:-{}d", self.start_offset_days, self.end_offset_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn yesterday_to_yesterday_is_zero_window() {
        let today = date("2024-06-15");
        let yesterday = date("2024-06-14");
        let window = TimeWindow::new(yesterday, yesterday);
        let relative = window.normalize(today).unwrap();
        assert_eq!(relative.as_date_period(), "-0d:-0d");
    }

    #[test]
    fn past_range_counts_back_from_yesterday() {
        let today = date("2024-02-15");
        let window = TimeWindow::new(date("2024-01-01"), date("2024-01-31"));
        let relative = window.normalize(today).unwrap();
        assert_eq!(relative.start_offset_days, 44);
        assert_eq!(relative.end_offset_days, 14);
        assert_eq!(relative.as_date_period(), "-44d:-14d");
    }

    #[test]
    fn bound_order_is_passed_through() {
        let today = date("2024-02-15");
        let window = TimeWindow::new(date("2024-01-31"), date("2024-01-01"));
        let relative = window.normalize(today).unwrap();
        assert_eq!(relative.as_date_period(), "-14d:-44d");
    }

    #[test]
    fn future_bound_is_rejected() {
        let today = date("2024-06-15");
        let window = TimeWindow::new(date("2024-06-01"), date("2024-06-20"));
        let err = window.normalize(today).unwrap_err();
        assert!(matches!(err, WindowError::FutureDate { .. }));
    }

    #[test]
    fn today_itself_is_past_the_boundary() {
        let today = date("2024-06-15");
        let window = TimeWindow::new(today, today);
        assert!(window.normalize(today).is_err());
    }
}
