//! Calendar-date primitives.
//!
//! Everything in the engine works on [`NaiveDate`]: a Gregorian year, month
//! and day with no time-of-day and no timezone. Values arriving from the host
//! in other shapes (timestamps, strings) are normalized through
//! [`ToCalendarDate`], which is where time components are dropped and
//! invalid input is rejected.

use std::fmt;

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use horizon_calendar_core::logging::targets;

/// Day number of 1970-01-01 counted from 0001-01-01 (which is day 1).
const UNIX_EPOCH_DAY: i64 = 719_163;

/// Returns today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Conversion of host-supplied values into a calendar day.
///
/// Returns `None` for values that do not name a valid date. Time-of-day is
/// discarded, so two values on the same day convert to equal dates.
pub trait ToCalendarDate {
    /// Converts `self` to a calendar day, if it names one.
    fn to_calendar_date(&self) -> Option<NaiveDate>;
}

impl ToCalendarDate for NaiveDate {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl ToCalendarDate for NaiveDateTime {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> ToCalendarDate for DateTime<Tz> {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`.
impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        let s = self.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        self.as_str().to_calendar_date()
    }
}

impl<T: ToCalendarDate> ToCalendarDate for Option<T> {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        self.as_ref().and_then(ToCalendarDate::to_calendar_date)
    }
}

impl<T: ToCalendarDate + ?Sized> ToCalendarDate for &T {
    fn to_calendar_date(&self) -> Option<NaiveDate> {
        (**self).to_calendar_date()
    }
}

/// Converts `input` to a calendar day, substituting today when it is absent
/// or invalid.
pub fn date_or_today(input: impl ToCalendarDate) -> NaiveDate {
    input.to_calendar_date().unwrap_or_else(|| {
        tracing::debug!(target: targets::DATE, "no valid date supplied, using today");
        today()
    })
}

/// Calendar-day equality: year, month and day match, time-of-day ignored.
///
/// Invalid values are never equal to anything.
pub fn same_day(a: impl ToCalendarDate, b: impl ToCalendarDate) -> bool {
    match (a.to_calendar_date(), b.to_calendar_date()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Stable identifier for a day: the number of days since 1970-01-01.
///
/// Rendered cells carry this key so a focus request can be resolved to an
/// element after the grid is rebuilt.
pub fn day_key(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAY
}

/// Maps a week-start index (0 = Sunday .. 6 = Saturday) to a weekday.
///
/// Indices above 6 wrap around.
pub fn weekday_from_index(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Returns true for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// The month shown by a calendar, anchored to its first day.
///
/// Because the value is stored as the first day of the month it is always
/// normalized: there is no way to hold "month 13" or "day 31 of February".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    first: NaiveDate,
}

impl DisplayedMonth {
    /// Creates a month from a year and a zero-based month index.
    ///
    /// `month0` may be any value: -1 is December of the previous year, 12 is
    /// January of the next one. Returns `None` outside chrono's date range.
    pub fn new(year: i32, month0: i32) -> Option<Self> {
        let total = i64::from(year) * 12 + i64::from(month0);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = total.rem_euclid(12) as u32 + 1;
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The month containing today's date.
    pub fn current() -> Self {
        Self::containing(today())
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// The month as 0-11.
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    /// The month as 1-12.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first.with_day(self.len_days()).unwrap_or(self.first)
    }

    /// Number of days in the month.
    pub fn len_days(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Shifts by `delta` months, anchored to day 1.
    ///
    /// Returns `None` if the result leaves chrono's date range.
    pub fn offset(&self, delta: i32) -> Option<Self> {
        let months = Months::new(delta.unsigned_abs());
        let first = if delta >= 0 {
            self.first.checked_add_months(months)?
        } else {
            self.first.checked_sub_months(months)?
        };
        Some(Self { first })
    }

    /// The date in this month with the given day-of-month, clamped to the
    /// month's length.
    pub fn clamped_day(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.len_days());
        self.first.with_day(day).unwrap_or(self.first)
    }
}

impl Default for DisplayedMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl From<NaiveDate> for DisplayedMonth {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_normalization() {
        let dec = DisplayedMonth::new(2024, -1).unwrap();
        assert_eq!((dec.year(), dec.month0()), (2023, 11));

        let jan = DisplayedMonth::new(2024, 12).unwrap();
        assert_eq!((jan.year(), jan.month()), (2025, 1));

        let far = DisplayedMonth::new(2024, -25).unwrap();
        assert_eq!((far.year(), far.month()), (2021, 12));
    }

    #[test]
    fn test_month_bounds() {
        let feb_leap = DisplayedMonth::new(2024, 1).unwrap();
        assert_eq!(feb_leap.first_day(), ymd(2024, 2, 1));
        assert_eq!(feb_leap.last_day(), ymd(2024, 2, 29));

        let feb = DisplayedMonth::new(2023, 1).unwrap();
        assert_eq!(feb.last_day(), ymd(2023, 2, 28));

        let century = DisplayedMonth::new(1900, 1).unwrap();
        assert_eq!(century.len_days(), 28);
        let millennium = DisplayedMonth::new(2000, 1).unwrap();
        assert_eq!(millennium.len_days(), 29);
    }

    #[test]
    fn test_month_offset_crosses_years() {
        let dec = DisplayedMonth::containing(ymd(2023, 12, 31));
        assert_eq!(dec.first_day(), ymd(2023, 12, 1));
        assert_eq!(dec.offset(1).unwrap().first_day(), ymd(2024, 1, 1));
        assert_eq!(dec.offset(-12).unwrap().first_day(), ymd(2022, 12, 1));
        assert_eq!(dec.offset(0), Some(dec));
    }

    #[test]
    fn test_month_offset_out_of_range() {
        let max = DisplayedMonth::containing(NaiveDate::MAX);
        assert!(max.offset(1).is_none());
    }

    #[test]
    fn test_contains_and_clamp() {
        let jan = DisplayedMonth::new(2024, 0).unwrap();
        assert!(jan.contains(ymd(2024, 1, 31)));
        assert!(!jan.contains(ymd(2024, 2, 1)));
        assert!(!jan.contains(ymd(2023, 1, 15)));

        let feb = jan.offset(1).unwrap();
        assert_eq!(feb.clamped_day(31), ymd(2024, 2, 29));
        assert_eq!(feb.clamped_day(0), ymd(2024, 2, 1));
        assert_eq!(feb.to_string(), "2024-02");
    }

    #[test]
    fn test_day_key() {
        assert_eq!(day_key(ymd(1970, 1, 1)), 0);
        assert_eq!(day_key(ymd(1970, 1, 2)), 1);
        assert_eq!(day_key(ymd(1969, 12, 31)), -1);
        assert_eq!(day_key(ymd(2024, 1, 1)), 19_723);
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0), Weekday::Sun);
        assert_eq!(weekday_from_index(1), Weekday::Mon);
        assert_eq!(weekday_from_index(6), Weekday::Sat);
        assert_eq!(weekday_from_index(8), Weekday::Mon);
        for i in 0..7 {
            assert_eq!(weekday_from_index(i).num_days_from_sunday(), u32::from(i));
        }
    }

    #[test]
    fn test_to_calendar_date_drops_time() {
        let morning = ymd(2024, 1, 5).and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        let evening = ymd(2024, 1, 5).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(same_day(morning, evening));
        assert!(same_day(morning, ymd(2024, 1, 5)));
        assert!(!same_day(morning, ymd(2024, 1, 6)));

        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let zoned = offset.from_local_datetime(&evening).single().unwrap();
        assert_eq!(zoned.to_calendar_date(), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_to_calendar_date_from_strings() {
        assert_eq!("2024-02-29".to_calendar_date(), Some(ymd(2024, 2, 29)));
        assert_eq!(" 2024-02-29 ".to_calendar_date(), Some(ymd(2024, 2, 29)));
        assert_eq!(
            "2024-03-01T10:00:00+02:00".to_calendar_date(),
            Some(ymd(2024, 3, 1))
        );
        assert_eq!("2024-03-01T10:00:00".to_calendar_date(), Some(ymd(2024, 3, 1)));
        assert_eq!("2023-02-29".to_calendar_date(), None);
        assert_eq!("not a date".to_calendar_date(), None);
        assert_eq!(String::new().to_calendar_date(), None);
    }

    #[test]
    fn test_invalid_dates_are_never_equal() {
        assert!(!same_day("garbage", "garbage"));
        assert!(!same_day(None::<NaiveDate>, None::<NaiveDate>));
    }

    #[test]
    fn test_date_or_today() {
        assert_eq!(date_or_today(ymd(2020, 5, 5)), ymd(2020, 5, 5));
        assert_eq!(date_or_today("2020-05-05"), ymd(2020, 5, 5));

        let before = today();
        let fallback = date_or_today("2020-13-45");
        let after = today();
        assert!(fallback == before || fallback == after);
        assert!(date_or_today(None::<NaiveDate>) >= before);
    }
}
