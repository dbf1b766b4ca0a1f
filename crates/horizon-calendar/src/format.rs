//! Date labels for assistive technology.
//!
//! Every rendered day gets a spoken/visible label such as
//! "Wednesday, January 10, 2024". Hosts may supply their own strftime-style
//! pattern; a pattern that cannot be rendered for a calendar date (unknown
//! specifiers, a dangling `%`, time or timezone fields) silently falls back
//! to the default label. Formatting never fails.

use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use horizon_calendar_core::logging::targets;

/// Preset date formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateFormat {
    /// Short format: MM/DD/YYYY
    Short,
    /// Long format: Month D, YYYY
    Long,
    /// ISO format: YYYY-MM-DD
    Iso,
    /// Weekday, Month D, YYYY (default label)
    #[default]
    Accessible,
}

impl DateFormat {
    /// The strftime pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Short => "%m/%d/%Y",
            Self::Long => "%B %-d, %Y",
            Self::Iso => "%Y-%m-%d",
            Self::Accessible => "%A, %B %-d, %Y",
        }
    }

    /// Formats `date` with this preset.
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// The fixed long-form label: full weekday, full month, day and year.
pub fn default_label(date: NaiveDate) -> String {
    DateFormat::Accessible.format(date)
}

/// Renders `pattern` for `date`, or `None` if it cannot be rendered.
fn render(date: NaiveDate, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Label for `date`.
///
/// Without a pattern, or with an empty one, this is [`default_label`].
/// Otherwise `pattern` is rendered as a strftime template, falling back to
/// the default label if that fails.
pub fn label(date: NaiveDate, pattern: Option<&str>) -> String {
    let Some(pattern) = pattern.filter(|p| !p.trim().is_empty()) else {
        return default_label(date);
    };
    render(date, pattern).unwrap_or_else(|| {
        tracing::debug!(target: targets::FORMAT, pattern, "unusable label pattern, using default");
        default_label(date)
    })
}

/// Formats day labels with an optional host-supplied pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFormatter {
    pattern: Option<String>,
}

impl LabelFormatter {
    /// Creates a formatter; `None` uses the default label.
    pub fn new(pattern: Option<String>) -> Self {
        Self { pattern }
    }

    /// The configured pattern.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Replaces the pattern.
    pub fn set_pattern(&mut self, pattern: Option<String>) {
        self.pattern = pattern;
    }

    /// Label for `date`.
    pub fn label(&self, date: NaiveDate) -> String {
        label(date, self.pattern())
    }
}
