//! Holiday records and the in-memory store the renderer queries.

use crate::calendar::is_valid_date;
use crate::error::CalendarError;

/// A single named public holiday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub name: String,
}

impl Holiday {
    /// Build a holiday, rejecting impossible dates and blank names.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        name: impl Into<String>,
    ) -> Result<Holiday, CalendarError> {
        if !is_valid_date(year, month, day) {
            return Err(CalendarError::InvalidDate { year, month, day });
        }
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CalendarError::EmptyName { year, month, day });
        }
        Ok(Holiday {
            year,
            month,
            day,
            name,
        })
    }

    fn falls_on(&self, year: i32, month: u32, day: u32) -> bool {
        self.year == year && self.month == month && self.day == day
    }
}

/// Ordered collection of holidays, in dataset order.
///
/// Duplicate dates are kept; point lookups return the earliest inserted
/// entry for a date.
#[derive(Debug, Clone, Default)]
pub struct HolidayStore {
    holidays: Vec<Holiday>,
}

impl HolidayStore {
    pub fn new() -> HolidayStore {
        HolidayStore::default()
    }

    /// Append `holidays` in order. Loading the same records twice keeps both
    /// copies.
    pub fn load<I>(&mut self, holidays: I) -> &mut Self
    where
        I: IntoIterator<Item = Holiday>,
    {
        self.holidays.extend(holidays);
        self
    }

    /// First holiday on the given date, if any.
    pub fn lookup(&self, year: i32, month: u32, day: u32) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.falls_on(year, month, day))
    }

    /// Returns true if the specified day is a holiday
    pub fn is_holiday(&self, year: i32, month: u32, day: u32) -> bool {
        self.lookup(year, month, day).is_some()
    }

    /// Every holiday in the month, sorted by day. Entries sharing a day keep
    /// their insertion order.
    pub fn list_for_month(&self, year: i32, month: u32) -> Vec<&Holiday> {
        let mut month_holidays: Vec<&Holiday> = self
            .holidays
            .iter()
            .filter(|h| h.year == year && h.month == month)
            .collect();
        month_holidays.sort_by_key(|h| h.day);
        month_holidays
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.iter()
    }
}

impl FromIterator<Holiday> for HolidayStore {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut store = HolidayStore::new();
        store.load(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(year: i32, month: u32, day: u32, name: &str) -> Holiday {
        Holiday::new(year, month, day, name).unwrap()
    }

    #[test]
    fn holiday_validation() {
        assert!(Holiday::new(2025, 2, 29, "x").is_err());
        assert!(Holiday::new(2024, 2, 29, "x").is_ok());
        assert!(Holiday::new(2025, 1, 1, "   ").is_err());
        assert!(Holiday::new(0, 1, 1, "x").is_err());
        assert_eq!(h(2025, 1, 1, " 元日 ").name, "元日");
    }

    #[test]
    fn empty_store_lookup() {
        let store = HolidayStore::new();
        assert!(store.is_empty());
        for (y, m, d) in [(2025, 1, 1), (1, 1, 1), (9999, 12, 31), (2025, 13, 40)] {
            assert_eq!(store.lookup(y, m, d), None);
        }
        assert!(store.list_for_month(2025, 1).is_empty());
    }

    #[test]
    fn lookup_returns_first_inserted() {
        let mut store = HolidayStore::new();
        store.load(vec![
            h(2025, 5, 5, "こどもの日"),
            h(2025, 5, 5, "端午"),
            h(2025, 5, 3, "憲法記念日"),
        ]);
        assert_eq!(store.lookup(2025, 5, 5).unwrap().name, "こどもの日");
        assert_eq!(true, store.is_holiday(2025, 5, 3));
        assert_eq!(false, store.is_holiday(2025, 5, 4));
        assert_eq!(false, store.is_holiday(2024, 5, 5));
    }

    #[test]
    fn load_appends() {
        let records = vec![h(2025, 1, 1, "元日")];
        let mut store = HolidayStore::new();
        store.load(records.clone()).load(records);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn month_listing_is_sorted_and_stable() {
        let store: HolidayStore = vec![
            h(2025, 11, 23, "勤労感謝の日"),
            h(2025, 11, 3, "文化の日"),
            h(2025, 12, 1, "other month"),
            h(2025, 11, 23, "second"),
            h(2024, 11, 4, "other year"),
            h(2025, 11, 24, "休日"),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = store
            .list_for_month(2025, 11)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["文化の日", "勤労感謝の日", "second", "休日"]);
    }
}
