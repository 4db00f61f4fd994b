use anyhow::{bail, Result};
use chrono::NaiveDate;

// Formats seen on the decision pages; extend as courts surface new ones.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",    // December 15, 2015
    "%b %d, %Y",    // Dec 15, 2015
    "%A, %B %d, %Y", // Tuesday, December 15, 2015
    "%B %d %Y",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y-%m-%d",
];

/// Parse free text into a calendar date. Errors on anything that is not
/// recognizably a date; the row fold treats that as "not a date header".
pub fn parse_date_string(text: &str) -> Result<NaiveDate> {
    let cleaned = text.trim().trim_end_matches('.').trim();
    if cleaned.is_empty() {
        bail!("empty date string");
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Ok(d);
        }
    }
    bail!("not a date: {:?}", cleaned)
}
