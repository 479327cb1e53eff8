//! Run configuration, read from JSON.
//!
//! Layers, later wins: built-in defaults, a JSON file, inline JSON in the
//! `HOLICAL_CONFIG` environment variable. Command-line flags are applied on
//! top by the binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CalendarError;
use crate::source::encoding_for_label;

/// Environment variable holding inline JSON configuration.
pub const CONFIG_ENV: &str = "HOLICAL_CONFIG";

/// Public holiday dataset published by the Cabinet Office of Japan.
pub const DEFAULT_DATASET_URL: &str = "https://www8.cao.go.jp/chosei/shukujitsu/syukujitsu.csv";

/// Top-level configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the dataset is downloaded from.
    pub dataset_url: String,
    /// Local cache artifact, UTF-8.
    pub cache_path: PathBuf,
    /// Encoding tried first when decoding a download.
    pub source_encoding: String,
    /// Year used when the year answer is not a number.
    pub fallback_year: i32,
    /// Month used when the month answer is not a number.
    pub fallback_month: u32,
    pub presentation: Presentation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            cache_path: PathBuf::from("holidays.csv"),
            source_encoding: "Shift_JIS".to_string(),
            fallback_year: 2025,
            fallback_month: 1,
            presentation: Presentation::default(),
        }
    }
}

/// Labels and glyphs used when printing a month.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Presentation {
    /// Weekday names, Sunday first.
    pub weekday_labels: [String; 7],
    /// Printed right after the day number of a holiday. Must be a visible
    /// ASCII character so that every day cell stays four columns wide.
    pub holiday_marker: char,
    pub holiday_heading: String,
    /// Printed instead of the list when the month has no holidays.
    pub none_label: String,
    /// Appended to the year in the title.
    pub year_suffix: String,
    /// Appended to the month in the title.
    pub month_suffix: String,
    /// Appended to the day number in the holiday list.
    pub day_suffix: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Presentation {
            weekday_labels: ["日", "月", "火", "水", "木", "金", "土"].map(String::from),
            holiday_marker: '*',
            holiday_heading: "【祝日】".to_string(),
            none_label: "なし".to_string(),
            year_suffix: "年".to_string(),
            month_suffix: "月".to_string(),
            day_suffix: "日".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid by `path` when given, overlaid by `HOLICAL_CONFIG`.
    pub fn load(path: Option<&Path>) -> Result<Config, CalendarError> {
        let mut merged = serde_json::to_value(Config::default())
            .map_err(|e| CalendarError::Config(e.to_string()))?;
        if let Some(path) = path {
            let text = fs::read_to_string(path).map_err(|e| {
                CalendarError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            merge(&mut merged, parse_layer(&text, &path.display().to_string())?);
        }
        if let Ok(inline) = env::var(CONFIG_ENV) {
            merge(&mut merged, parse_layer(&inline, CONFIG_ENV)?);
        }
        let config: Config =
            serde_json::from_value(merged).map_err(|e| CalendarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single JSON document on top of the defaults.
    pub fn from_json(text: &str) -> Result<Config, CalendarError> {
        let config: Config =
            serde_json::from_str(text).map_err(|e| CalendarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn encoding(&self) -> Result<&'static Encoding, CalendarError> {
        encoding_for_label(&self.source_encoding)
    }

    fn validate(&self) -> Result<(), CalendarError> {
        self.encoding()?;
        if !(1..=12).contains(&self.fallback_month) {
            return Err(CalendarError::Config(format!(
                "fallback_month must be between 1 and 12, got {}",
                self.fallback_month
            )));
        }
        let marker = self.presentation.holiday_marker;
        if !marker.is_ascii_graphic() {
            return Err(CalendarError::Config(format!(
                "holiday_marker must be a visible ASCII character, got {marker:?}"
            )));
        }
        Ok(())
    }
}

fn parse_layer(text: &str, origin: &str) -> Result<Value, CalendarError> {
    serde_json::from_str(text).map_err(|e| CalendarError::Config(format!("{origin}: {e}")))
}

/// Overlay `layer` onto `base`, recursing into objects.
fn merge(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
