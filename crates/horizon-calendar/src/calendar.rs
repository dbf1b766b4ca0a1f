//! The host-facing calendar engine.
//!
//! [`Calendar`] combines grid building, disablement, selection and keyboard
//! navigation behind one value that a presentation layer drives:
//!
//! - render from [`Calendar::cells`], which is recomputed on every call
//! - route clicks to [`Calendar::activate`] and key presses to
//!   [`Calendar::handle_key`]
//! - page with [`Calendar::page_month`]
//! - after each render, take [`Calendar::take_focus_request`] and focus the
//!   cell whose key matches
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use horizon_calendar::{Calendar, Key, SelectionMode};
//!
//! let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//!
//! let mut calendar = Calendar::new()
//!     .with_seed(jan(31))
//!     .with_mode(SelectionMode::Multiple)
//!     .with_first_day_of_week(Weekday::Mon)
//!     .with_disabled_dates([jan(1)]);
//!
//! calendar.month_changed.connect(|month| {
//!     println!("Now showing {month}");
//! });
//!
//! // Arrow right from the last day of January moves to February.
//! calendar.handle_key(jan(31), Key::ArrowRight);
//! let request = calendar.take_focus_request().unwrap();
//! let cells = calendar.cells();
//! assert!(cells.iter().any(|cell| cell.key == request.key()));
//! ```
//!
//! # Signals
//!
//! - `selection_changed(Selection)`: Emitted after an activation changes the selection
//! - `month_changed(DisplayedMonth)`: Emitted once per displayed-month change
//! - `focus_requested(FocusRequest)`: Emitted when keyboard navigation moves focus

use chrono::{NaiveDate, Weekday};
use horizon_calendar_core::Signal;
use horizon_calendar_core::logging::targets;

use crate::config::CalendarConfig;
use crate::constraints::Constraints;
use crate::date::{DisplayedMonth, ToCalendarDate, date_or_today, today, weekday_from_index};
use crate::format::LabelFormatter;
use crate::grid::{DayCell, build_cells, build_grid};
use crate::navigation::{FocusMove, FocusRequest, Key, KeyPress, NavigationController, PageDirection};
use crate::selection::{Selection, SelectionEngine, SelectionMode};

/// A calendar month view's state and behavior, independent of rendering.
pub struct Calendar {
    /// Displayed month and pending keyboard focus.
    navigation: NavigationController,
    /// Selection state for the configured mode.
    selection: SelectionEngine,
    /// Blocked dates and bounds.
    constraints: Constraints,
    /// First column of the grid.
    first_day_of_week: Weekday,
    /// Day label formatting.
    formatter: LabelFormatter,
    /// The date highlighted as today.
    today: NaiveDate,

    /// Signal emitted when an activation produces a new selection.
    pub selection_changed: Signal<Selection>,
    /// Signal emitted when the displayed month changes.
    pub month_changed: Signal<DisplayedMonth>,
    /// Signal emitted when keyboard navigation requests focus on a day.
    pub focus_requested: Signal<FocusRequest>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    /// Create a calendar showing today's month, in single-selection mode,
    /// with Sunday as the first day of the week.
    pub fn new() -> Self {
        let today = today();
        Self {
            navigation: NavigationController::new(DisplayedMonth::containing(today)),
            selection: SelectionEngine::default(),
            constraints: Constraints::new(),
            first_day_of_week: Weekday::Sun,
            formatter: LabelFormatter::default(),
            today,
            selection_changed: Signal::new(),
            month_changed: Signal::new(),
            focus_requested: Signal::new(),
        }
    }

    /// Create a calendar from host configuration.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new()
            .with_seed(config.seed())
            .with_selection(config.selection())
            .with_constraints(config.constraints())
            .with_first_day_of_week(config.week_start())
            .with_label_pattern(config.label_pattern.clone())
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Show the month containing `seed`; today's month if it is absent or
    /// not a valid date.
    pub fn with_seed(mut self, seed: impl ToCalendarDate) -> Self {
        self.navigation = NavigationController::new(DisplayedMonth::containing(date_or_today(seed)));
        self
    }

    /// Use `mode`, starting from an empty selection.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.selection = SelectionEngine::new(mode);
        self
    }

    /// Start from `selection`; its variant sets the mode.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = SelectionEngine::with_selection(selection);
        self
    }

    /// Replace all disablement rules.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Block the given dates.
    pub fn with_disabled_dates<I, D>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: ToCalendarDate,
    {
        self.constraints.set_disabled_dates(dates);
        self
    }

    /// Set minimum date using builder pattern.
    pub fn with_minimum_date(mut self, date: impl ToCalendarDate) -> Self {
        self.constraints.set_minimum_date(date);
        self
    }

    /// Set maximum date using builder pattern.
    pub fn with_maximum_date(mut self, date: impl ToCalendarDate) -> Self {
        self.constraints.set_maximum_date(date);
        self
    }

    /// Set date range using builder pattern.
    pub fn with_date_range(mut self, min: impl ToCalendarDate, max: impl ToCalendarDate) -> Self {
        self.constraints.set_minimum_date(min);
        self.constraints.set_maximum_date(max);
        self
    }

    /// Set first day of week using builder pattern.
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Set first day of week from an index (0 = Sunday .. 6 = Saturday).
    pub fn with_week_start(self, index: u8) -> Self {
        self.with_first_day_of_week(weekday_from_index(index))
    }

    /// Set the day label pattern; `None` uses the default label.
    pub fn with_label_pattern(mut self, pattern: impl Into<Option<String>>) -> Self {
        self.formatter.set_pattern(pattern.into());
        self
    }

    /// Override the date highlighted as today.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// The month currently shown.
    pub fn displayed_month(&self) -> DisplayedMonth {
        self.navigation.displayed_month()
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// The current selection value.
    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    /// The first click of an uncommitted range.
    pub fn pending_anchor(&self) -> Option<NaiveDate> {
        self.selection.pending_anchor()
    }

    /// The disablement rules.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Replace the disablement rules.
    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = constraints;
    }

    /// Get the first day of the week.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Set the first day of the week.
    pub fn set_first_day_of_week(&mut self, day: Weekday) {
        self.first_day_of_week = day;
    }

    /// The date highlighted as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The dates of the displayed grid.
    pub fn dates(&self) -> Vec<NaiveDate> {
        build_grid(self.displayed_month(), self.first_day_of_week)
    }

    /// The cells of the displayed grid, computed from the current state.
    pub fn cells(&self) -> Vec<DayCell> {
        build_cells(
            self.displayed_month(),
            self.first_day_of_week,
            &self.constraints,
            self.today,
            |date| self.selection.is_selected(date),
        )
    }

    /// Whether `date` is disabled.
    pub fn is_disabled(&self, date: impl ToCalendarDate) -> bool {
        self.constraints.is_disabled(date)
    }

    /// Whether `date` is shown as selected. Time-of-day is ignored.
    pub fn is_selected(&self, date: impl ToCalendarDate) -> bool {
        date.to_calendar_date()
            .is_some_and(|date| self.selection.is_selected(date))
    }

    /// Accessible label for `date`.
    pub fn label(&self, date: NaiveDate) -> String {
        self.formatter.label(date)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Activate `date` (click, Enter or Space).
    ///
    /// Emits `selection_changed` and returns the new value when the
    /// activation produced one. Disabled dates and the first click of a range
    /// produce nothing.
    pub fn activate(&mut self, date: impl ToCalendarDate) -> Option<Selection> {
        let Some(date) = date.to_calendar_date() else {
            tracing::trace!(target: targets::SELECTION, "ignoring activation of invalid date");
            return None;
        };
        let selection = self.selection.activate(date, &self.constraints)?;
        self.selection_changed.emit(selection.clone());
        Some(selection)
    }

    /// Replace the selection with a host-supplied value without emitting.
    ///
    /// Returns `false` if the value is for a different mode.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        self.selection.set_selection(selection)
    }

    /// Clear the selection and emit the empty value.
    pub fn clear_selection(&mut self) {
        let empty = self.selection.clear();
        self.selection_changed.emit(empty);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn report_month(&self, month: Option<DisplayedMonth>) -> DisplayedMonth {
        if let Some(month) = month {
            self.month_changed.emit(month);
        }
        self.displayed_month()
    }

    /// Show the previous or next month.
    pub fn page_month(&mut self, direction: PageDirection) -> DisplayedMonth {
        let changed = self.navigation.page_month(direction);
        self.report_month(changed)
    }

    /// Show the previous month.
    pub fn show_previous_month(&mut self) -> DisplayedMonth {
        self.page_month(PageDirection::Previous)
    }

    /// Show the next month.
    pub fn show_next_month(&mut self) -> DisplayedMonth {
        self.page_month(PageDirection::Next)
    }

    /// Show the same month of the previous or next year.
    pub fn page_year(&mut self, direction: PageDirection) -> DisplayedMonth {
        let changed = self.navigation.page_year(direction);
        self.report_month(changed)
    }

    /// Navigate to show a specific date's month.
    pub fn show_date(&mut self, date: NaiveDate) -> DisplayedMonth {
        let changed = self.navigation.show_date(date);
        self.report_month(changed)
    }

    /// Show today's month.
    pub fn show_today(&mut self) -> DisplayedMonth {
        self.show_date(self.today)
    }

    fn report_focus(&self, focus_move: FocusMove) -> FocusMove {
        if focus_move.month_changed {
            self.month_changed.emit(focus_move.displayed_month);
        }
        self.focus_requested.emit(focus_move.focus);
        focus_move
    }

    /// Move keyboard focus `day_offset` days from `from`.
    ///
    /// Emits `month_changed` if the target is outside the displayed month,
    /// then `focus_requested`. Disabled days may receive focus.
    pub fn move_focus(&mut self, from: NaiveDate, day_offset: i64) -> FocusMove {
        let focus_move = self.navigation.move_focus(from, day_offset);
        self.report_focus(focus_move)
    }

    /// Handle a key press while `focused` has keyboard focus.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, focused: NaiveDate, press: impl Into<KeyPress>) -> bool {
        let press = press.into();
        match press.key {
            Key::Enter | Key::Space => {
                self.activate(focused);
                true
            }
            Key::Escape => self.selection.cancel_pending(),
            _ => match self.navigation.move_focus_for_key(focused, press) {
                Some(focus_move) => {
                    self.report_focus(focus_move);
                    true
                }
                None => false,
            },
        }
    }

    /// The focus request waiting for the next render.
    pub fn pending_focus(&self) -> Option<FocusRequest> {
        self.navigation.pending_focus()
    }

    /// Take the pending focus request. Call only after re-rendering the grid.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.navigation.take_focus_request()
    }
}

// Ensure Calendar is Send + Sync
static_assertions::assert_impl_all!(Calendar: Send, Sync);
