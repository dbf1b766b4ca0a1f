//! Date disablement rules.
//!
//! A date is disabled when it is explicitly blocked, or when it lies outside
//! the optional `[min, max]` bounds. The same [`Constraints`] value is used
//! to mark rendered cells and to reject activations, so the two can never
//! disagree.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::ToCalendarDate;

/// Blocked dates and optional bounds supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    disabled_dates: BTreeSet<NaiveDate>,
    minimum_date: Option<NaiveDate>,
    maximum_date: Option<NaiveDate>,
}

impl Constraints {
    /// Creates constraints that allow every date.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Disabled Dates
    // =========================================================================

    /// Blocks the given dates.
    ///
    /// Values are normalized to calendar days; entries that are not valid
    /// dates are skipped.
    pub fn with_disabled_dates<I, D>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: ToCalendarDate,
    {
        self.set_disabled_dates(dates);
        self
    }

    /// Replaces the set of blocked dates.
    pub fn set_disabled_dates<I, D>(&mut self, dates: I)
    where
        I: IntoIterator<Item = D>,
        D: ToCalendarDate,
    {
        self.disabled_dates = dates
            .into_iter()
            .filter_map(|d| d.to_calendar_date())
            .collect();
    }

    /// Blocks a single date.
    pub fn disable(&mut self, date: impl ToCalendarDate) {
        if let Some(date) = date.to_calendar_date() {
            self.disabled_dates.insert(date);
        }
    }

    /// The explicitly blocked dates, in ascending order.
    pub fn disabled_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.disabled_dates.iter().copied()
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    /// Get the minimum selectable date.
    pub fn minimum_date(&self) -> Option<NaiveDate> {
        self.minimum_date
    }

    /// Set the minimum selectable date.
    pub fn set_minimum_date(&mut self, date: impl ToCalendarDate) {
        self.minimum_date = date.to_calendar_date();
    }

    /// Set minimum date using builder pattern.
    pub fn with_minimum_date(mut self, date: impl ToCalendarDate) -> Self {
        self.set_minimum_date(date);
        self
    }

    /// Get the maximum selectable date.
    pub fn maximum_date(&self) -> Option<NaiveDate> {
        self.maximum_date
    }

    /// Set the maximum selectable date.
    pub fn set_maximum_date(&mut self, date: impl ToCalendarDate) {
        self.maximum_date = date.to_calendar_date();
    }

    /// Set maximum date using builder pattern.
    pub fn with_maximum_date(mut self, date: impl ToCalendarDate) -> Self {
        self.set_maximum_date(date);
        self
    }

    /// Set both bounds using builder pattern.
    pub fn with_date_range(self, min: impl ToCalendarDate, max: impl ToCalendarDate) -> Self {
        self.with_minimum_date(min).with_maximum_date(max)
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Whether `date` is disabled.
    ///
    /// True if `date` is on a blocked day, before the minimum, or after the
    /// maximum. Comparison is by calendar day, so a timestamp late on a
    /// blocked day is still blocked. A value that is not a valid date is
    /// reported as disabled.
    pub fn is_disabled(&self, date: impl ToCalendarDate) -> bool {
        let Some(date) = date.to_calendar_date() else {
            return true;
        };
        self.disabled_dates.contains(&date)
            || self.minimum_date.is_some_and(|min| date < min)
            || self.maximum_date.is_some_and(|max| date > max)
    }

    /// Whether `date` may be activated.
    pub fn is_enabled(&self, date: impl ToCalendarDate) -> bool {
        !self.is_disabled(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_constraints() {
        let constraints = Constraints::new();
        assert!(!constraints.is_disabled(ymd(2024, 1, 1)));
        assert!(constraints.is_enabled(NaiveDate::MIN));
        assert!(constraints.is_enabled(NaiveDate::MAX));
    }

    #[test]
    fn test_disabled_dates_ignore_time() {
        let late = ymd(2024, 1, 1).and_time(NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        let constraints = Constraints::new().with_disabled_dates([late]);

        assert!(constraints.is_disabled(ymd(2024, 1, 1)));
        let early = ymd(2024, 1, 1).and_time(NaiveTime::from_hms_opt(0, 5, 0).unwrap());
        assert!(constraints.is_disabled(early));
        assert!(!constraints.is_disabled(ymd(2024, 1, 2)));
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let constraints = Constraints::new().with_disabled_dates(["2024-01-01", "bogus"]);
        assert_eq!(constraints.disabled_dates().collect::<Vec<_>>(), vec![ymd(2024, 1, 1)]);
        assert!(constraints.is_disabled("bogus"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let constraints = Constraints::new().with_date_range(ymd(2024, 1, 10), ymd(2024, 1, 20));
        assert!(constraints.is_disabled(ymd(2024, 1, 9)));
        assert!(constraints.is_enabled(ymd(2024, 1, 10)));
        assert!(constraints.is_enabled(ymd(2024, 1, 20)));
        assert!(constraints.is_disabled(ymd(2024, 1, 21)));
    }

    #[test]
    fn test_disabled_iff_blocked_or_out_of_bounds() {
        let min = ymd(2024, 2, 5);
        let max = ymd(2024, 3, 25);
        let blocked = [ymd(2024, 2, 14), ymd(2024, 3, 1), ymd(2024, 4, 1)];
        let constraints = Constraints::new()
            .with_disabled_dates(blocked)
            .with_minimum_date(min)
            .with_maximum_date(max);

        let mut date = ymd(2024, 1, 1);
        while date <= ymd(2024, 5, 1) {
            let expected = blocked.contains(&date) || date < min || date > max;
            assert_eq!(constraints.is_disabled(date), expected, "{date}");
            date += Duration::days(1);
        }
    }

    #[test]
    fn test_setters_replace_state() {
        let mut constraints = Constraints::new();
        constraints.disable(ymd(2024, 6, 1));
        constraints.set_minimum_date(ymd(2024, 5, 1));
        assert!(constraints.is_disabled(ymd(2024, 6, 1)));
        assert!(constraints.is_disabled(ymd(2024, 4, 30)));

        constraints.set_disabled_dates(Vec::<NaiveDate>::new());
        constraints.set_minimum_date(None::<NaiveDate>);
        assert!(constraints.is_enabled(ymd(2024, 6, 1)));
        assert!(constraints.is_enabled(ymd(2024, 4, 30)));
        assert_eq!(constraints.minimum_date(), None);
    }
}
