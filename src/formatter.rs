use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateParseError, prelude::*};

/// An opaque clock-time label such as "10:00".
/// Never parsed or validated, only interpolated verbatim into output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLabel(String);

impl From<&str> for TimeLabel {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A pair of calendar dates with optional time labels attached to either end,
/// rendered as a single human-readable string via `Display`.
///
/// The layout depends on how the two dates relate (same day, same month,
/// same year, different years) and which of the two times are present.
/// `start <= end` is assumed but not enforced; rendering of a reversed
/// range is unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
    start_time: Option<TimeLabel>,
    end_time: Option<TimeLabel>,
}

/// The four mutually exclusive layout categories, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeKind {
    SameDay,
    SameMonth,
    SameYear,
    DifferentYears,
}

impl DateRange {
    /// Creates a range from already-parsed dates and optional time labels.
    pub const fn new(
        start: CalendarDate,
        end: CalendarDate,
        start_time: Option<TimeLabel>,
        end_time: Option<TimeLabel>,
    ) -> Self {
        Self {
            start,
            end,
            start_time,
            end_time,
        }
    }

    /// Creates a range from the four string inputs, failing fast if either
    /// date string is malformed. The time strings are taken verbatim.
    ///
    /// # Errors
    /// Returns a `DateParseError` if either date string is not a valid date.
    pub fn from_strs(
        start: &str,
        end: &str,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Self, DateParseError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
            start_time: start_time.map(TimeLabel::from),
            end_time: end_time.map(TimeLabel::from),
        })
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns the start time label, if present
    pub const fn start_time(&self) -> Option<&TimeLabel> {
        self.start_time.as_ref()
    }

    /// Returns the end time label, if present
    pub const fn end_time(&self) -> Option<&TimeLabel> {
        self.end_time.as_ref()
    }

    fn kind(&self) -> RangeKind {
        if self.start == self.end {
            RangeKind::SameDay
        } else if self.start.year() != self.end.year() {
            RangeKind::DifferentYears
        } else if self.start.month() == self.end.month() {
            RangeKind::SameMonth
        } else {
            RangeKind::SameYear
        }
    }

    /// Single-day layouts: one full date, times appended with
    /// "at" / "until" / "at .. to".
    fn format_same_day(&self) -> String {
        let date = full_date(&self.start);
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => format!("{} to {end}", date_at_time(&date, start)),
            (Some(start), None) => date_at_time(&date, start),
            (None, Some(end)) => format!("{date} until {end}"),
            (None, None) => date,
        }
    }

    /// "1st - 3rd November 2009"
    fn format_same_month(&self) -> String {
        format!(
            "{} - {} {} {}",
            self.start.day_typed().ordinal(),
            self.end.day_typed().ordinal(),
            self.end.month_typed().name(),
            self.end.year()
        )
    }

    /// "1st November - 1st December 2009"
    fn format_same_year(&self) -> String {
        format!(
            "{} {} - {}",
            self.start.day_typed().ordinal(),
            self.start.month_typed().name(),
            full_date(&self.end)
        )
    }

    /// "1st November 2009 - 1st December 2010"
    fn format_different_years(&self) -> String {
        format!("{} - {}", full_date(&self.start), full_date(&self.end))
    }

    /// Shared layout for multi-day ranges once any time is present: both
    /// sides spelled out in full, each time attached to its own date.
    fn format_with_full_dates(&self) -> String {
        let start = full_date(&self.start);
        let end = full_date(&self.end);
        match (&self.start_time, &self.end_time) {
            (Some(start_time), Some(end_time)) => format!(
                "{} - {}",
                date_at_time(&start, start_time),
                date_at_time(&end, end_time)
            ),
            (Some(start_time), None) => format!("{} - {end}", date_at_time(&start, start_time)),
            (None, Some(end_time)) => format!("{start} - {end} at {end_time}"),
            (None, None) => format!("{start} - {end}"),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let no_times = self.start_time.is_none() && self.end_time.is_none();
        let rendered = match self.kind() {
            RangeKind::SameDay => self.format_same_day(),
            RangeKind::SameMonth if no_times => self.format_same_month(),
            RangeKind::SameYear if no_times => self.format_same_year(),
            RangeKind::DifferentYears if no_times => self.format_different_years(),
            _ => self.format_with_full_dates(),
        };
        f.write_str(&rendered)
    }
}

/// "{ordinal day} {Month name} {year}", e.g. "1st November 2009"
fn full_date(date: &CalendarDate) -> String {
    format!(
        "{} {} {}",
        date.day_typed().ordinal(),
        date.month_typed().name(),
        date.year()
    )
}

fn date_at_time(date: &str, time: &TimeLabel) -> String {
    format!("{date} at {time}")
}

/// Formats a date range in one call from its four string inputs.
///
/// # Errors
/// Returns a `DateParseError` if either date string is malformed.
pub fn format_range(
    start: &str,
    end: &str,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<String, DateParseError> {
    Ok(DateRange::from_strs(start, end, start_time, end_time)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(start: &str, end: &str, start_time: Option<&str>, end_time: Option<&str>) -> String {
        format_range(start, end, start_time, end_time).expect("failed to format test range")
    }

    #[test]
    fn test_same_day_without_times() {
        assert_eq!(rendered("2009-11-1", "2009-11-1", None, None), "1st November 2009");
    }

    #[test]
    fn test_same_day_with_starting_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-1", Some("10:00"), None),
            "1st November 2009 at 10:00"
        );
    }

    #[test]
    fn test_same_day_with_ending_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-1", None, Some("11:00")),
            "1st November 2009 until 11:00"
        );
    }

    #[test]
    fn test_same_day_with_both_times() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-1", Some("10:00"), Some("11:00")),
            "1st November 2009 at 10:00 to 11:00"
        );
    }

    #[test]
    fn test_same_month_without_times() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-3", None, None),
            "1st - 3rd November 2009"
        );
    }

    #[test]
    fn test_same_month_with_starting_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-3", Some("10:00"), None),
            "1st November 2009 at 10:00 - 3rd November 2009"
        );
    }

    #[test]
    fn test_same_month_with_ending_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-3", None, Some("11:00")),
            "1st November 2009 - 3rd November 2009 at 11:00"
        );
    }

    #[test]
    fn test_same_month_with_both_times() {
        assert_eq!(
            rendered("2009-11-1", "2009-11-3", Some("10:00"), Some("11:00")),
            "1st November 2009 at 10:00 - 3rd November 2009 at 11:00"
        );
    }

    #[test]
    fn test_same_year_without_times() {
        assert_eq!(
            rendered("2009-11-1", "2009-12-1", None, None),
            "1st November - 1st December 2009"
        );
    }

    #[test]
    fn test_same_year_with_starting_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-12-1", Some("10:00"), None),
            "1st November 2009 at 10:00 - 1st December 2009"
        );
    }

    #[test]
    fn test_same_year_with_ending_time() {
        assert_eq!(
            rendered("2009-11-1", "2009-12-1", None, Some("11:00")),
            "1st November 2009 - 1st December 2009 at 11:00"
        );
    }

    #[test]
    fn test_same_year_with_both_times() {
        assert_eq!(
            rendered("2009-11-1", "2009-12-1", Some("10:00"), Some("11:00")),
            "1st November 2009 at 10:00 - 1st December 2009 at 11:00"
        );
    }

    #[test]
    fn test_different_years_without_times() {
        assert_eq!(
            rendered("2009-11-1", "2010-12-1", None, None),
            "1st November 2009 - 1st December 2010"
        );
    }

    #[test]
    fn test_different_years_with_starting_time() {
        assert_eq!(
            rendered("2009-11-1", "2010-12-1", Some("10:00"), None),
            "1st November 2009 at 10:00 - 1st December 2010"
        );
    }

    #[test]
    fn test_different_years_with_ending_time() {
        assert_eq!(
            rendered("2009-11-1", "2010-12-1", None, Some("11:00")),
            "1st November 2009 - 1st December 2010 at 11:00"
        );
    }

    #[test]
    fn test_different_years_with_both_times() {
        assert_eq!(
            rendered("2009-11-1", "2010-12-1", Some("10:00"), Some("11:00")),
            "1st November 2009 at 10:00 - 1st December 2010 at 11:00"
        );
    }

    #[test]
    fn test_different_years_with_same_months() {
        // Year difference wins over matching months
        assert_eq!(
            rendered("2009-11-1", "2010-11-3", None, None),
            "1st November 2009 - 3rd November 2010"
        );
    }

    #[test]
    fn test_ordinals_in_output() {
        assert_eq!(
            rendered("2009-11-21", "2009-11-22", None, None),
            "21st - 22nd November 2009"
        );
        assert_eq!(
            rendered("2009-11-11", "2009-11-13", None, None),
            "11th - 13th November 2009"
        );
        assert_eq!(
            rendered("2009-10-31", "2009-10-31", None, None),
            "31st October 2009"
        );
    }

    #[test]
    fn test_time_labels_are_opaque() {
        // Time labels are display tokens, not parsed times
        assert_eq!(
            rendered("2009-11-1", "2009-11-1", Some("half past nine"), None),
            "1st November 2009 at half past nine"
        );
        assert_eq!(
            rendered("2009-11-1", "2009-11-1", None, Some("midnight")),
            "1st November 2009 until midnight"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let range = DateRange::from_strs("2009-11-1", "2009-12-1", Some("10:00"), Some("11:00"))
            .expect("failed to construct range for idempotence test");
        assert_eq!(range.to_string(), range.to_string());
    }

    #[test]
    fn test_invalid_start_date() {
        let result = format_range("2009-13-1", "2009-11-3", None, None);
        assert!(matches!(result, Err(DateParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_invalid_end_date() {
        let result = format_range("2009-11-1", "not a date", None, None);
        assert!(matches!(result, Err(DateParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_new_from_parsed_dates() {
        let start = "2009-11-1".parse().expect("failed to parse start date");
        let end = "2009-11-3".parse().expect("failed to parse end date");
        let range = DateRange::new(start, end, Some(TimeLabel::from("10:00")), None);
        assert_eq!(range.to_string(), "1st November 2009 at 10:00 - 3rd November 2009");
    }

    #[test]
    fn test_accessors() {
        let range = DateRange::from_strs("2009-11-1", "2009-11-3", Some("10:00"), None)
            .expect("failed to construct range for accessor test");
        assert_eq!(range.start().to_string(), "2009-11-01");
        assert_eq!(range.end().to_string(), "2009-11-03");
        assert_eq!(range.start_time().map(ToString::to_string), Some("10:00".to_owned()));
        assert_eq!(range.end_time(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let range = DateRange::from_strs("2009-11-1", "2009-12-1", Some("10:00"), Some("11:00"))
            .expect("failed to construct range for serde test");
        let json = serde_json::to_string(&range).expect("failed to serialize range");
        let parsed: DateRange = serde_json::from_str(&json).expect("failed to deserialize range");
        assert_eq!(range, parsed);
        assert_eq!(parsed.to_string(), "1st November 2009 at 10:00 - 1st December 2009 at 11:00");
    }

    #[test]
    fn test_serde_json_shape() {
        let range = DateRange::from_strs("2009-11-1", "2009-11-3", None, Some("11:00"))
            .expect("failed to construct range for serde shape test");
        let json = serde_json::to_string(&range).expect("failed to serialize range");
        assert_eq!(
            json,
            r#"{"start":"2009-11-01","end":"2009-11-03","start_time":null,"end_time":"11:00"}"#
        );
    }

    #[test]
    fn test_time_label_display_and_deref() {
        let label = TimeLabel::from("10:00");
        assert_eq!(label.to_string(), "10:00");
        assert_eq!(label.len(), 5);
    }
}
