//! Month grid assembly.
//!
//! [`build_grid`] produces the gapless run of dates a month view shows:
//! every day of the displayed month, padded at both ends with days from the
//! neighbouring months so that the run starts on the configured week-start
//! day and ends on the day before it. The result always holds whole weeks
//! (four to six of them).
//!
//! [`build_cells`] decorates that run with per-cell flags. Cells are
//! recomputed on every call and never cached, so they always reflect the
//! current month, constraints and selection.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use horizon_calendar_core::PerfSpan;
use horizon_calendar_core::logging::targets;

use crate::constraints::Constraints;
use crate::date::{DisplayedMonth, day_key};

/// Number of columns in a month grid.
pub const DAYS_PER_WEEK: usize = 7;

/// One rendered day of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The calendar day.
    pub date: NaiveDate,
    /// Stable identifier derived from the date (days since 1970-01-01).
    pub key: i64,
    /// Day of the week.
    pub weekday: Weekday,
    /// Whether the day belongs to the displayed month.
    pub in_current_month: bool,
    /// Whether the day is blocked or out of bounds.
    pub disabled: bool,
    /// Whether the day is part of the current selection.
    pub selected: bool,
    /// Whether the day is today.
    pub is_today: bool,
}

/// Number of leading days from the previous month.
fn leading_days(first: NaiveDate, week_start: Weekday) -> u64 {
    let first_weekday = first.weekday().num_days_from_sunday();
    let start = week_start.num_days_from_sunday();
    u64::from((first_weekday + 7 - start) % 7)
}

/// Number of trailing days from the next month.
fn trailing_days(last: NaiveDate, week_start: Weekday) -> u64 {
    let week_end = week_start.pred().num_days_from_sunday();
    let last_weekday = last.weekday().num_days_from_sunday();
    u64::from((week_end + 7 - last_weekday) % 7)
}

/// Builds the dates shown for `month`, in ascending order.
///
/// The first date falls on `week_start`, the last on the day before it, and
/// the length is a multiple of seven.
pub fn build_grid(month: DisplayedMonth, week_start: Weekday) -> Vec<NaiveDate> {
    let first = month.first_day();
    let last = month.last_day();

    let start = first
        .checked_sub_days(Days::new(leading_days(first, week_start)))
        .unwrap_or(first);
    let end = last
        .checked_add_days(Days::new(trailing_days(last, week_start)))
        .unwrap_or(last);

    let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    tracing::trace!(
        target: targets::GRID,
        %month,
        start = %start,
        end = %end,
        len = dates.len(),
        "built month grid"
    );
    dates
}

/// Builds the decorated cells for `month`.
///
/// `is_selected` is consulted for every cell; it is usually
/// [`SelectionEngine::is_selected`](crate::selection::SelectionEngine::is_selected).
pub fn build_cells<F>(
    month: DisplayedMonth,
    week_start: Weekday,
    constraints: &Constraints,
    today: NaiveDate,
    is_selected: F,
) -> Vec<DayCell>
where
    F: Fn(NaiveDate) -> bool,
{
    let _span = PerfSpan::new("build_cells");
    build_grid(month, week_start)
        .into_iter()
        .map(|date| DayCell {
            date,
            key: day_key(date),
            weekday: date.weekday(),
            in_current_month: month.contains(date),
            disabled: constraints.is_disabled(date),
            selected: is_selected(date),
            is_today: date == today,
        })
        .collect()
}

/// Splits a grid into week rows.
pub fn weeks<T>(cells: &[T]) -> impl Iterator<Item = &[T]> {
    cells.chunks(DAYS_PER_WEEK)
}

/// Column headers for a grid starting on `week_start`.
pub fn weekday_headers(week_start: Weekday) -> [Weekday; DAYS_PER_WEEK] {
    let mut headers = [week_start; DAYS_PER_WEEK];
    for i in 1..DAYS_PER_WEEK {
        headers[i] = headers[i - 1].succ();
    }
    headers
}

/// ISO-8601 week number of `date`, for an optional week-number column.
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Finds the cell for a focus target, if it is rendered.
pub fn find_cell(cells: &[DayCell], key: i64) -> Option<&DayCell> {
    cells.iter().find(|cell| cell.key == key)
}
