//! Month paging and keyboard focus movement.
//!
//! [`NavigationController`] owns the displayed month. It changes only when
//! the host pages (previous/next month or year, jump to a date) or when a
//! keyboard move lands outside the month on screen.
//!
//! Keyboard moves produce a [`FocusRequest`] naming the day that should get
//! focus. The target cell may not exist yet: when the move crossed into
//! another month the grid has to be rebuilt first. The host therefore
//! re-renders, and only then takes the request with
//! [`NavigationController::take_focus_request`] and focuses the cell whose
//! key matches. Only the latest request is kept; an unconsumed request is
//! replaced by the next one.

use chrono::{Datelike, Days, NaiveDate};
use horizon_calendar_core::logging::targets;
use horizon_calendar_core::{Property, ReadOnlyProperty};

use crate::date::{DisplayedMonth, day_key};

/// Direction of a paging step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDirection {
    /// Towards earlier dates.
    Previous,
    /// Towards later dates.
    Next,
}

impl PageDirection {
    /// Maps the sign of `step` to a direction; zero has none.
    pub fn from_sign(step: i32) -> Option<Self> {
        match step.signum() {
            -1 => Some(Self::Previous),
            1 => Some(Self::Next),
            _ => None,
        }
    }

    fn months(self, per_step: i32) -> i32 {
        match self {
            Self::Previous => -per_step,
            Self::Next => per_step,
        }
    }
}

/// Keys the calendar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// One day back.
    ArrowLeft,
    /// One day forward.
    ArrowRight,
    /// One week back.
    ArrowUp,
    /// One week forward.
    ArrowDown,
    /// First day of the focused month.
    Home,
    /// Last day of the focused month.
    End,
    /// Same day one month back (one year with Shift).
    PageUp,
    /// Same day one month forward (one year with Shift).
    PageDown,
    /// Activate the focused day.
    Enter,
    /// Activate the focused day.
    Space,
    /// Abandon a pending range.
    Escape,
}

/// A key press with the modifiers the calendar cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key.
    pub key: Key,
    /// Whether Shift was held.
    pub shift: bool,
}

impl KeyPress {
    /// A key press without modifiers.
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    /// The same key with Shift held.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// A request for the host to focus the cell showing `target` after its next
/// render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusRequest {
    /// The day to focus.
    pub target: NaiveDate,
}

impl FocusRequest {
    /// Key of the cell to focus; matches [`DayCell::key`](crate::grid::DayCell::key).
    pub fn key(&self) -> i64 {
        day_key(self.target)
    }
}

/// Outcome of a keyboard focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    /// The month shown after the move.
    pub displayed_month: DisplayedMonth,
    /// Whether the move changed the displayed month.
    pub month_changed: bool,
    /// Where focus should go once the grid is rebuilt.
    pub focus: FocusRequest,
}

/// Owns the displayed month and the pending keyboard focus target.
#[derive(Debug)]
pub struct NavigationController {
    displayed_month: Property<DisplayedMonth>,
    pending_focus: Option<FocusRequest>,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(DisplayedMonth::current())
    }
}

impl NavigationController {
    /// Creates a controller showing `month`.
    pub fn new(month: DisplayedMonth) -> Self {
        Self {
            displayed_month: Property::new(month),
            pending_focus: None,
        }
    }

    /// The month currently shown.
    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed_month.get()
    }

    /// Read-only view of the displayed month.
    pub fn displayed(&self) -> ReadOnlyProperty<'_, DisplayedMonth> {
        ReadOnlyProperty::new(&self.displayed_month)
    }

    /// Shows `month`. Returns the new month if it differs from the old one.
    fn set_displayed_month(&mut self, month: DisplayedMonth) -> Option<DisplayedMonth> {
        let old = self.displayed_month.replace(month)?;
        tracing::debug!(target: targets::NAVIGATION, from = %old, to = %month, "displayed month changed");
        Some(month)
    }

    fn shift_months(&mut self, months: i32) -> Option<DisplayedMonth> {
        let current = self.displayed_month();
        match current.offset(months) {
            Some(month) => self.set_displayed_month(month),
            None => {
                tracing::warn!(
                    target: targets::NAVIGATION,
                    %current,
                    months,
                    "paging would leave the supported date range"
                );
                None
            }
        }
    }

    // =========================================================================
    // Paging
    // =========================================================================

    /// Moves the displayed month by one month.
    ///
    /// Returns the new month, or `None` when paging would leave chrono's date
    /// range (the month is then left unchanged).
    pub fn page_month(&mut self, direction: PageDirection) -> Option<DisplayedMonth> {
        self.shift_months(direction.months(1))
    }

    /// Moves the displayed month by one year.
    pub fn page_year(&mut self, direction: PageDirection) -> Option<DisplayedMonth> {
        self.shift_months(direction.months(12))
    }

    /// Shows the month containing `date`.
    ///
    /// Returns the new month only if it differs from the one already shown.
    pub fn show_date(&mut self, date: NaiveDate) -> Option<DisplayedMonth> {
        self.set_displayed_month(DisplayedMonth::containing(date))
    }

    // =========================================================================
    // Keyboard Focus
    // =========================================================================

    /// Moves keyboard focus `day_offset` days from `from`.
    ///
    /// If the target lies outside the displayed month, the month containing
    /// it becomes the displayed month. A focus request for the target is
    /// always recorded, replacing any unconsumed one. Disabled days may
    /// receive focus. An offset that would leave chrono's date range keeps
    /// focus on `from`.
    pub fn move_focus(&mut self, from: NaiveDate, day_offset: i64) -> FocusMove {
        let days = Days::new(day_offset.unsigned_abs());
        let target = if day_offset >= 0 {
            from.checked_add_days(days)
        } else {
            from.checked_sub_days(days)
        };
        let target = target.unwrap_or_else(|| {
            tracing::warn!(target: targets::NAVIGATION, %from, day_offset, "focus move out of range");
            from
        });
        self.focus_on(target)
    }

    /// Moves keyboard focus according to `press`, starting at `from`.
    ///
    /// Returns `None` for keys that do not move focus.
    pub fn move_focus_for_key(&mut self, from: NaiveDate, press: KeyPress) -> Option<FocusMove> {
        let focus_move = match press.key {
            Key::ArrowLeft => self.move_focus(from, -1),
            Key::ArrowRight => self.move_focus(from, 1),
            Key::ArrowUp => self.move_focus(from, -7),
            Key::ArrowDown => self.move_focus(from, 7),
            Key::Home => self.focus_on(DisplayedMonth::containing(from).first_day()),
            Key::End => self.focus_on(DisplayedMonth::containing(from).last_day()),
            Key::PageUp | Key::PageDown => {
                let direction = if press.key == Key::PageUp {
                    PageDirection::Previous
                } else {
                    PageDirection::Next
                };
                let months = direction.months(if press.shift { 12 } else { 1 });
                let target = DisplayedMonth::containing(from)
                    .offset(months)
                    .map_or(from, |month| month.clamped_day(from.day()));
                self.focus_on(target)
            }
            Key::Enter | Key::Space | Key::Escape => return None,
        };
        Some(focus_move)
    }

    fn focus_on(&mut self, target: NaiveDate) -> FocusMove {
        let month_changed = if self.displayed_month().contains(target) {
            false
        } else {
            self.set_displayed_month(DisplayedMonth::containing(target))
                .is_some()
        };

        let focus = FocusRequest { target };
        if let Some(previous) = self.pending_focus.replace(focus) {
            tracing::trace!(
                target: targets::NAVIGATION,
                superseded = %previous.target,
                "unconsumed focus request replaced"
            );
        }
        tracing::debug!(target: targets::NAVIGATION, %target, month_changed, "focus requested");

        FocusMove {
            displayed_month: self.displayed_month(),
            month_changed,
            focus,
        }
    }

    /// The focus request waiting for the next render, if any.
    pub fn pending_focus(&self) -> Option<FocusRequest> {
        self.pending_focus
    }

    /// Takes the pending focus request. Call after the grid is re-rendered.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.pending_focus.take()
    }
}
