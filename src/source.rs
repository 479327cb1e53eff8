//! Reading the holiday dataset: decoding downloaded bytes into canonical
//! UTF-8 text and parsing that text into [`Holiday`] records.
//!
//! The dataset is a comma separated file with one header line followed by
//! `<date>,<name>[,...]` rows, where `<date>` is `YYYY-MM-DD` or
//! `YYYY/MM/DD` (zero padding optional). Rows that do not fit that shape are
//! skipped one at a time; parsing as a whole never fails.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::error::CalendarError;
use crate::holiday::Holiday;

/// Header written in front of re-encoded datasets.
pub const CANONICAL_HEADER: &str = "国民の祝日・休日月日,国民の祝日・休日名称";

/// Result of parsing a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Accepted records, in input line order.
    pub holidays: Vec<Holiday>,
    /// Non-empty data lines that were dropped as malformed.
    pub skipped: usize,
}

/// Parse dataset text. The first line is always treated as a header.
pub fn parse(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(holiday) => outcome.holidays.push(holiday),
            None => {
                debug!(line = idx + 1, content = line, "skipping malformed holiday row");
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

fn parse_record(line: &str) -> Option<Holiday> {
    let mut fields = line.split(',');
    let date = fields.next()?.trim();
    let name = fields.next()?.trim();

    let parts: Vec<&str> = date.split(|c: char| c == '-' || c == '/').collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;
    Holiday::new(year, month, day, name).ok()
}

/// Decode raw dataset bytes into UTF-8 text.
///
/// A byte order mark, when present, decides the encoding. Otherwise the
/// bytes are decoded strictly as `primary`, and then strictly as UTF-8 if
/// that fails.
pub fn normalize_for_storage(
    raw: &[u8],
    primary: &'static Encoding,
) -> Result<String, CalendarError> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(raw) {
        return strict_decode(&raw[bom_len..], encoding).ok_or(CalendarError::Decode {
            encoding: encoding.name(),
        });
    }
    if let Some(text) = strict_decode(raw, primary) {
        return Ok(text);
    }
    debug!(
        encoding = primary.name(),
        "dataset is not valid in primary encoding, trying UTF-8"
    );
    strict_decode(raw, UTF_8).ok_or(CalendarError::Decode {
        encoding: primary.name(),
    })
}

fn strict_decode(raw: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(|text| text.into_owned())
}

/// Look up an encoding by its WHATWG label, e.g. `Shift_JIS` or `utf-8`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, CalendarError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| CalendarError::Config(format!("unknown text encoding `{label}`")))
}

/// Render records as a canonical dataset: fixed header, then one
/// `YYYY-MM-DD,name` line per record.
pub fn encode_for_storage<'a, I>(holidays: I) -> String
where
    I: IntoIterator<Item = &'a Holiday>,
{
    let mut text = String::from(CANONICAL_HEADER);
    text.push('\n');
    for h in holidays {
        text.push_str(&format!(
            "{:04}-{:02}-{:02},{}\n",
            h.year, h.month, h.day, h.name
        ));
    }
    text
}
