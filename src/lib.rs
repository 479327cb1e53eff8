//! Text month calendar annotated with public holidays.
//!
//! The holiday dataset is read from a local cache or downloaded on request
//! ([`acquire`]), parsed into records ([`source`]), kept in a
//! [`HolidayStore`](holiday::HolidayStore) and printed as a Sunday-first grid
//! ([`render`]).

pub mod acquire;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod holiday;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod source;

pub use error::CalendarError;
pub use holiday::{Holiday, HolidayStore};
