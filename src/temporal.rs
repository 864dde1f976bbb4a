//! Date parsing and interval arithmetic shared by every engine.
//!
//! Project application windows and registration conflict checks all reduce to
//! the same inclusive-range overlap test, so it lives here as a leaf module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range during which a project accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
}

impl DateWindow {
    pub fn new(opens_on: NaiveDate, closes_on: NaiveDate) -> Self {
        Self { opens_on, closes_on }
    }

    /// Closing on or after opening.
    pub fn is_valid(&self) -> bool {
        self.closes_on >= self.opens_on
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.opens_on && day <= self.closes_on
    }

    /// Inclusive overlap: windows that merely touch (one closes the day the
    /// other opens) count as overlapping.
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        self.opens_on <= other.closes_on && other.opens_on <= self.closes_on
    }
}

/// Overlap test tolerating absent windows: an undefined window cannot
/// overlap anything.
pub fn windows_overlap(a: Option<&DateWindow>, b: Option<&DateWindow>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => false,
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
