//! Gregorian month geometry: month lengths, leap years and the weekday
//! column on which a month starts.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Smallest year accepted anywhere in the crate.
pub const MIN_YEAR: i32 = 1;
/// Largest year accepted anywhere in the crate.
pub const MAX_YEAR: i32 = 9999;

/// Shape of one month on a Sunday-first grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGeometry {
    pub year: i32,
    pub month: u32,
    /// Number of days, 28 to 31.
    pub days: u32,
    /// Column of day 1, 0 (Sunday) to 6 (Saturday).
    pub offset: u32,
}

impl MonthGeometry {
    pub fn new(year: i32, month: u32) -> Result<MonthGeometry, CalendarError> {
        Ok(MonthGeometry {
            year,
            month,
            days: days_in_month(year, month)?,
            offset: first_weekday_offset(year, month)?,
        })
    }

    /// Number of week rows needed to hold every day of the month.
    pub fn weeks(&self) -> u32 {
        (self.offset + self.days).div_ceil(7)
    }
}

/// First day of the given month, or `InvalidDate` when the month or year is
/// out of range.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidDate {
            year,
            month,
            day: 1,
        });
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidDate {
        year,
        month,
        day: 1,
    })
}

/// Returns true if the specified year is a leap year (i.e. Feb 29th exists for this year)
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Calculate the number of days in a given month in a given year
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    month_start(year, month)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next
        .and_then(|d| d.pred_opt())
        .ok_or(CalendarError::InvalidDate {
            year,
            month,
            day: 31,
        })?;
    Ok(last.day())
}

/// Weekday of day 1 as a column index, 0 = Sunday through 6 = Saturday.
pub fn first_weekday_offset(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(month_start(year, month)?.weekday().num_days_from_sunday())
}

/// Returns true when `day` exists in the given month.
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year) && NaiveDate::from_ymd_opt(year, month, day).is_some()
}
