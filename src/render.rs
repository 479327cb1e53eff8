//! Month grid rendering.

use std::fmt;

use crate::calendar::MonthGeometry;
use crate::config::Presentation;
use crate::error::CalendarError;
use crate::holiday::{Holiday, HolidayStore};

const RULE: &str = "----------------------------";

/// One day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub holiday: bool,
}

/// A rendered month: weekday header, day cells and the holiday list.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub geometry: MonthGeometry,
    pub header: &'a [String; 7],
    /// Exactly one cell per day of the month, in day order.
    pub cells: Vec<DayCell>,
    /// Holidays of the month sorted by day.
    pub holidays: Vec<&'a Holiday>,
    presentation: &'a Presentation,
}

impl MonthView<'_> {
    /// Cells laid out in weeks of seven; `None` pads before day 1 and after
    /// the last day.
    pub fn weeks(&self) -> Vec<[Option<DayCell>; 7]> {
        let mut weeks = vec![[None; 7]; self.geometry.weeks() as usize];
        for (i, cell) in self.cells.iter().enumerate() {
            let slot = self.geometry.offset as usize + i;
            weeks[slot / 7][slot % 7] = Some(*cell);
        }
        weeks
    }
}

impl fmt::Display for MonthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.presentation;
        writeln!(
            f,
            "        {}{} {}{}",
            self.geometry.year, p.year_suffix, self.geometry.month, p.month_suffix
        )?;
        writeln!(f, "{RULE}")?;
        for label in self.header {
            write!(f, " {label} ")?;
        }
        writeln!(f)?;
        writeln!(f, "{RULE}")?;

        for week in self.weeks() {
            let used = week.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
            for cell in &week[..used] {
                match cell {
                    Some(c) if c.holiday => write!(f, "{:3}{}", c.day, p.holiday_marker)?,
                    Some(c) => write!(f, "{:3} ", c.day)?,
                    None => write!(f, "    ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f)?;
        writeln!(f, "{}", p.holiday_heading)?;
        if self.holidays.is_empty() {
            writeln!(f, "  {}", p.none_label)?;
        } else {
            for h in &self.holidays {
                writeln!(f, "  {:2}{}: {}", h.day, p.day_suffix, h.name)?;
            }
        }
        Ok(())
    }
}

/// Lays a month out on a Sunday-first grid and marks holidays from a store.
#[derive(Debug, Clone, Default)]
pub struct CalendarRenderer {
    presentation: Presentation,
}

impl CalendarRenderer {
    pub fn new(presentation: Presentation) -> CalendarRenderer {
        CalendarRenderer { presentation }
    }

    pub fn render<'a>(
        &'a self,
        year: i32,
        month: u32,
        store: &'a HolidayStore,
    ) -> Result<MonthView<'a>, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth {
                month: month.into(),
            });
        }
        let geometry = MonthGeometry::new(year, month)?;
        let cells = (1..=geometry.days)
            .map(|day| DayCell {
                day,
                holiday: store.is_holiday(year, month, day),
            })
            .collect();
        Ok(MonthView {
            geometry,
            header: &self.presentation.weekday_labels,
            cells,
            holidays: store.list_for_month(year, month),
            presentation: &self.presentation,
        })
    }
}
