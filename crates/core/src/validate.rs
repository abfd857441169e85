//! Plausibility checks and date conversion.
//!
//! Every candidate the cascade produces passes through these gates before it
//! can become a result: the calendar components must form a real date, and
//! the date must fall inside the configured [`DateBounds`] window. Rendering
//! to the caller's output format happens last, after a candidate has won.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use crate::patterns::MIN_YEAR;
use crate::{Result, TemporaError};

/// Inclusive plausibility window for extracted dates.
///
/// Defaults to a fixed minimum year and "today": web documents claiming
/// dates before the minimum or in the future are treated as noise.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use tempora_core::DateBounds;
///
/// let bounds = DateBounds::default();
/// assert!(bounds.contains(NaiveDate::from_ymd_opt(2015, 6, 1).unwrap()));
/// assert!(!bounds.contains(NaiveDate::from_ymd_opt(1988, 3, 3).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateBounds {
    /// Earliest acceptable date (inclusive).
    pub earliest: NaiveDate,
    /// Latest acceptable date (inclusive).
    pub latest: NaiveDate,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            earliest: NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or_default(),
            latest: Utc::now().date_naive(),
        }
    }
}

impl DateBounds {
    /// Creates a window from explicit endpoints.
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Self {
        Self { earliest, latest }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }

    pub(crate) fn min_year(&self) -> i32 {
        self.earliest.year()
    }

    pub(crate) fn max_year(&self) -> i32 {
        self.latest.year()
    }
}

/// Checks a resolved date against the plausibility window.
pub fn validate_date(date: NaiveDate, bounds: &DateBounds) -> bool {
    bounds.contains(date)
}

/// Builds a date from components, returning it only when the components form
/// a real calendar date inside the window.
pub(crate) fn validate_date_parts(year: i32, month: u32, day: u32, bounds: &DateBounds) -> Option<NaiveDate> {
    // Pre-Gregorian years are never plausible for web documents.
    if year < 1582 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    bounds.contains(date).then_some(date)
}

/// Year-level plausibility: January 1st of `year` must be inside the window.
pub(crate) fn validate_year(year: i32, bounds: &DateBounds) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|date| bounds.contains(date))
}

/// Year-level check against the upper bound only. Copyright notices may
/// legitimately predate the window's lower bound.
pub(crate) fn validate_year_latest(year: i32, bounds: &DateBounds) -> bool {
    year >= 1582 && NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|date| date <= bounds.latest)
}

/// Checks whether a date string parses under `format` and falls inside the
/// window. Never panics or errors: malformed formats and malformed values
/// both yield `false`.
pub fn validate_date_string(value: &str, format: &str, bounds: &DateBounds) -> bool {
    let parsed = if format == "%Y" {
        value.trim().parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::parse_from_str(value, format).ok()
    };

    parsed.is_some_and(|date| bounds.contains(date))
}

/// Renders a date under a strftime-style output format.
///
/// Fails (rather than panicking) when the format contains directives that
/// cannot be rendered for a calendar date.
pub(crate) fn format_date(date: NaiveDate, output_format: &str) -> Result<String> {
    use std::fmt::Write;

    let mut rendered = String::new();
    write!(rendered, "{}", date.format(output_format))
        .map_err(|_| TemporaError::InvalidFormat(output_format.to_string()))?;

    Ok(rendered)
}

/// Re-renders a date string from one strftime-style format into another.
///
/// Identical input and output formats short-circuit to the value itself.
///
/// # Errors
///
/// Returns [`TemporaError::FormatMismatch`] when `value` does not conform to
/// `input_format`.
///
/// # Example
///
/// ```rust
/// use tempora_core::convert_date;
///
/// let converted = convert_date("2017-09-01", "%Y-%m-%d", "%d.%m.%Y").unwrap();
/// assert_eq!(converted, "01.09.2017");
///
/// // Fast-path identity
/// let same = convert_date("2017-09-01", "%Y-%m-%d", "%Y-%m-%d").unwrap();
/// assert_eq!(same, "2017-09-01");
/// ```
pub fn convert_date(value: &str, input_format: &str, output_format: &str) -> Result<String> {
    if input_format == output_format {
        return Ok(value.to_string());
    }

    let date = NaiveDate::parse_from_str(value, input_format).map_err(|_| TemporaError::FormatMismatch {
        value: value.to_string(),
        format: input_format.to_string(),
    })?;

    format_date(date, output_format)
}

/// Validates the configured output format once per call, before extraction.
///
/// The format must contain at least one `%`-directive and must successfully
/// render a reference date.
pub fn output_format_validator(output_format: &str) -> Result<()> {
    if !output_format.contains('%') {
        return Err(TemporaError::InvalidFormat(output_format.to_string()));
    }

    let reference = NaiveDate::from_ymd_opt(2017, 9, 1).unwrap_or_default();
    format_date(reference, output_format)?;

    Ok(())
}

/// Folds a new attempt into the running best-reference date: older wins when
/// hunting for the original date, newer wins otherwise.
pub(crate) fn compare_values(
    reference: Option<NaiveDate>,
    attempt: NaiveDate,
    prefer_original: bool,
) -> Option<NaiveDate> {
    match reference {
        None => Some(attempt),
        Some(current) if prefer_original && attempt < current => Some(attempt),
        Some(current) if !prefer_original && attempt > current => Some(attempt),
        Some(current) => Some(current),
    }
}

/// Final gate for the running best-reference date.
pub(crate) fn check_extracted_reference(reference: Option<NaiveDate>, bounds: &DateBounds) -> Option<NaiveDate> {
    reference.filter(|date| bounds.contains(*date))
}

/// Validates a winning three-component candidate string.
///
/// The catch pattern re-extracts year, month and day; the assembled date
/// must be plausible, and when a copyright year was found in the footer the
/// candidate year must not predate it. The copyright year acts as a lower
/// bound only; no symmetric upper-bound rule exists for original-date mode.
pub(crate) fn filter_ymd_candidate(
    candidate: &str,
    catch: &Regex,
    pattern_name: &str,
    copyright_year: i32,
    bounds: &DateBounds,
) -> Option<NaiveDate> {
    let caps = catch.captures(candidate)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;

    let date = validate_date_parts(year, month, day, bounds)?;
    if copyright_year != 0 && year < copyright_year {
        debug!(pattern = pattern_name, candidate, copyright_year, "candidate predates copyright year");
        return None;
    }

    debug!(pattern = pattern_name, %date, "date found");
    Some(date)
}
