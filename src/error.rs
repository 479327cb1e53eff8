//! Error types for the holical crate.

/// Error type for all fallible operations in the holical crate.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// A caller-supplied month outside 1-12.
    #[error("month must be between 1 and 12, got {month}")]
    InvalidMonth { month: i64 },

    /// A (year, month, day) triple that is not a real Gregorian date.
    #[error("{year}-{month}-{day} is not a valid date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// A holiday record whose name is blank after trimming.
    #[error("holiday on {year}-{month}-{day} has an empty name")]
    EmptyName { year: i32, month: u32, day: u32 },

    /// Network retrieval failed or answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Bytes could not be decoded under the primary encoding nor UTF-8.
    #[error("dataset is neither valid {encoding} nor valid UTF-8")]
    Decode { encoding: &'static str },

    /// Configuration could not be read or understood.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CalendarError {
    /// Transport and decode failures are recovered by falling back to an
    /// empty holiday set; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalendarError::Transport(_) | CalendarError::Decode { .. } | CalendarError::Io(_)
        )
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(e: reqwest::Error) -> Self {
        CalendarError::Transport(e.to_string())
    }
}
