use chrono::{Datelike, NaiveDate};

use crate::error::{DateMathError, DateMathResult};

/// A calendar date with no time-of-day or timezone component.
///
/// Only produced by [`parse_date`], [`parse_iso_date`] or from an existing
/// [`NaiveDate`], so it always denotes a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue(NaiveDate);

impl DateValue {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%d.%m.%Y"))
    }
}

/// Dynamically typed request values only convert when they are strings in
/// the strict `DD.MM.YYYY` form.
impl TryFrom<&serde_json::Value> for DateValue {
    type Error = DateMathError;

    fn try_from(value: &serde_json::Value) -> DateMathResult<Self> {
        match value {
            serde_json::Value::String(text) => parse_date(text),
            serde_json::Value::Null => Err(DateMathError::InvalidOperand("null")),
            serde_json::Value::Bool(_) => {
                Err(DateMathError::InvalidOperand("boolean"))
            }
            serde_json::Value::Number(_) => {
                Err(DateMathError::InvalidOperand("number"))
            }
            serde_json::Value::Array(_) => {
                Err(DateMathError::InvalidOperand("array"))
            }
            serde_json::Value::Object(_) => {
                Err(DateMathError::InvalidOperand("object"))
            }
        }
    }
}

/// ISO 8601 layouts as (shape, suffix, chrono format). A day-less week date
/// gets the Monday suffix appended before parsing.
const ISO_FORMS: [(&str, &str, &str); 6] = [
    ("####-##-##", "", "%Y-%m-%d"),
    ("########", "", "%Y%m%d"),
    ("####-W##-#", "", "%G-W%V-%u"),
    ("####-W##", "-1", "%G-W%V-%u"),
    ("####W###", "", "%GW%V%u"),
    ("####W##", "1", "%GW%V%u"),
];

/// Parse a date in strict `DD.MM.YYYY` form.
///
/// Day and month must be zero-padded to two digits and the year must have
/// four digits. Any other separator or ordering is rejected.
pub fn parse_date(text: &str) -> DateMathResult<DateValue> {
    if !has_shape(text, "##.##.####") || text.ends_with("0000") {
        return Err(invalid(text));
    }

    NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .map(DateValue)
        .map_err(|_| invalid(text))
}

/// Parse an ISO 8601 date.
///
/// Accepts the extended (`YYYY-MM-DD`) and basic (`YYYYMMDD`) calendar forms
/// as well as week dates (`YYYY-Www-D`, `YYYYWwwD`, and the day-less
/// `YYYY-Www` / `YYYYWww`, which resolve to the Monday of that week).
pub fn parse_iso_date(text: &str) -> DateMathResult<DateValue> {
    let (_, suffix, format) = ISO_FORMS
        .iter()
        .find(|(shape, _, _)| has_shape(text, shape))
        .ok_or_else(|| invalid(text))?;

    if text.starts_with("0000") {
        return Err(invalid(text));
    }

    NaiveDate::parse_from_str(&format!("{text}{suffix}"), format)
        .map(DateValue)
        .map_err(|_| invalid(text))
}

fn invalid(text: &str) -> DateMathError {
    DateMathError::InvalidDateFormat(text.to_string())
}

// `#` stands for one ASCII digit, every other byte must match literally.
// chrono alone would accept unpadded fields and signed years.
fn has_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'#' => c.is_ascii_digit(),
            _ => c == s,
        })
}
