//! Host configuration for a calendar.
//!
//! [`CalendarConfig`] is the serializable form of everything a host passes
//! to a calendar: the month to open on, the selection mode and initial
//! value, disablement rules, week start and label pattern. Dates are ISO
//! `YYYY-MM-DD` strings (timestamps are accepted and truncated to the day).
//!
//! ```toml
//! seed_date = "2024-02-14"
//! mode = "range"
//! week_start = 1
//! label_pattern = "%A %-d %B %Y"
//! disabled_dates = ["2024-02-19"]
//! min_date = "2024-01-01"
//! initial_selection = ["2024-02-05", "2024-02-09"]
//! ```
//!
//! Syntax errors and an out-of-range week start are reported as
//! [`Error`](crate::Error)s. Date strings that do not parse are not errors:
//! an unusable seed becomes today, and unusable entries elsewhere are
//! dropped with a warning.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use horizon_calendar_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;
use crate::date::{ToCalendarDate, date_or_today, weekday_from_index};
use crate::error::{Error, Result};
use crate::selection::{DateRange, Selection, SelectionMode};

/// Serializable calendar settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Date whose month is shown first; today when absent or invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_date: Option<String>,
    /// Selection mode.
    pub mode: SelectionMode,
    /// First column of the grid, 0 (Sunday) to 6 (Saturday).
    pub week_start: u8,
    /// strftime pattern for day labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_pattern: Option<String>,
    /// Dates that cannot be selected.
    pub disabled_dates: Vec<String>,
    /// Earliest selectable date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    /// Latest selectable date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
    /// Initial selection: one date for single mode, any number for multiple
    /// mode, two endpoints for range mode.
    pub initial_selection: Vec<String>,
}

/// Parses `value`, warning about and discarding it if it is not a date.
fn parse_entry(field: &'static str, value: &str) -> Option<NaiveDate> {
    let date = value.to_calendar_date();
    if date.is_none() {
        tracing::warn!(target: targets::CONFIG, field, value, "ignoring invalid date");
    }
    date
}

fn parse_entries<'a>(
    field: &'static str,
    values: impl IntoIterator<Item = &'a String>,
) -> Vec<NaiveDate> {
    values
        .into_iter()
        .filter_map(|value| parse_entry(field, value))
        .collect()
}

impl CalendarConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading calendar configuration");
        Self::from_toml_str(&source)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Checks the fields that cannot be repaired silently.
    pub fn validate(&self) -> Result<()> {
        if self.week_start > 6 {
            return Err(Error::InvalidWeekStart(self.week_start));
        }
        Ok(())
    }

    /// The configured week start.
    pub fn week_start(&self) -> Weekday {
        weekday_from_index(self.week_start)
    }

    /// The date whose month is shown first.
    pub fn seed(&self) -> NaiveDate {
        if let Some(seed) = self.seed_date.as_deref() {
            if seed.to_calendar_date().is_none() {
                tracing::warn!(target: targets::CONFIG, seed, "invalid seed date, using today");
            }
        }
        date_or_today(&self.seed_date)
    }

    /// Disablement rules built from the date fields.
    pub fn constraints(&self) -> Constraints {
        let mut constraints =
            Constraints::new().with_disabled_dates(parse_entries("disabled_dates", &self.disabled_dates));
        if let Some(min) = self.min_date.as_deref() {
            constraints.set_minimum_date(parse_entry("min_date", min));
        }
        if let Some(max) = self.max_date.as_deref() {
            constraints.set_maximum_date(parse_entry("max_date", max));
        }
        constraints
    }

    /// The initial selection, shaped for the configured mode.
    pub fn selection(&self) -> Selection {
        let dates = parse_entries("initial_selection", &self.initial_selection);
        match self.mode {
            SelectionMode::Single => Selection::Single(dates.first().copied()),
            SelectionMode::Multiple => Selection::Multiple(dates),
            SelectionMode::Range => match dates.as_slice() {
                [] => Selection::Range(None),
                [start, end] => Selection::Range(Some(DateRange::new(*start, *end))),
                _ => {
                    tracing::warn!(
                        target: targets::CONFIG,
                        count = dates.len(),
                        "range selection needs exactly two dates, ignoring"
                    );
                    Selection::Range(None)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const RANGE_CONFIG: &str = r#"
seed_date = "2024-02-14"
mode = "range"
week_start = 1
label_pattern = "%A %-d %B %Y"
disabled_dates = ["2024-02-19", "2024-02-30"]
min_date = "2024-01-01"
initial_selection = ["2024-02-09", "2024-02-05"]
"#;

    #[test]
    fn test_parse_full_config() {
        let config = CalendarConfig::from_toml_str(RANGE_CONFIG).unwrap();
        assert_eq!(config.mode, SelectionMode::Range);
        assert_eq!(config.week_start(), Weekday::Mon);
        assert_eq!(config.seed(), ymd(2024, 2, 14));
        assert_eq!(config.label_pattern.as_deref(), Some("%A %-d %B %Y"));

        let constraints = config.constraints();
        assert_eq!(constraints.disabled_dates().collect::<Vec<_>>(), vec![ymd(2024, 2, 19)]);
        assert_eq!(constraints.minimum_date(), Some(ymd(2024, 1, 1)));
        assert_eq!(constraints.maximum_date(), None);

        assert_eq!(
            config.selection(),
            Selection::Range(Some(DateRange::new(ymd(2024, 2, 5), ymd(2024, 2, 9))))
        );
    }

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::from_toml_str("").unwrap();
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.week_start(), Weekday::Sun);
        assert_eq!(config.selection(), Selection::Single(None));
        assert_eq!(config.constraints(), Constraints::new());
    }

    #[test]
    fn test_invalid_seed_falls_back_to_today() {
        let config = CalendarConfig::from_toml_str(r#"seed_date = "tomorrow-ish""#).unwrap();
        let before = crate::date::today();
        let seed = config.seed();
        let after = crate::date::today();
        assert!(seed == before || seed == after);
    }

    #[test]
    fn test_rejects_bad_week_start() {
        let err = CalendarConfig::from_toml_str("week_start = 7").unwrap_err();
        assert!(matches!(err, Error::InvalidWeekStart(7)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            CalendarConfig::from_toml_str("mode = ").unwrap_err(),
            Error::Parse(_)
        ));
        assert!(matches!(
            CalendarConfig::from_toml_str(r#"mode = "weekly""#).unwrap_err(),
            Error::Parse(_)
        ));
        assert!(matches!(
            CalendarConfig::from_toml_str("colour = 1").unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn test_selection_shapes_per_mode() {
        let mut config = CalendarConfig {
            initial_selection: vec!["2024-03-01".into(), "junk".into(), "2024-03-04".into()],
            ..Default::default()
        };
        assert_eq!(config.selection(), Selection::Single(Some(ymd(2024, 3, 1))));

        config.mode = SelectionMode::Multiple;
        assert_eq!(
            config.selection(),
            Selection::Multiple(vec![ymd(2024, 3, 1), ymd(2024, 3, 4)])
        );

        config.mode = SelectionMode::Range;
        assert_eq!(
            config.selection(),
            Selection::Range(Some(DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 4))))
        );

        config.initial_selection.truncate(1);
        assert_eq!(config.selection(), Selection::Range(None));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = CalendarConfig::from_toml_str(RANGE_CONFIG).unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(CalendarConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RANGE_CONFIG.as_bytes()).unwrap();

        let config = CalendarConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.mode, SelectionMode::Range);

        let missing = file.path().with_extension("missing");
        let err = CalendarConfig::from_toml_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("failed to read"));
    }
}
