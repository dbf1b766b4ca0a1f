//! Selection engine for calendar views.
//!
//! This module provides [`SelectionEngine`], which holds the selection state
//! for one of three modes and turns day activations (clicks, Enter) into
//! committed selection values.
//!
//! | Mode | On activation | Emits |
//! |------|---------------|-------|
//! | [`SelectionMode::Single`] | remembers the date | the date |
//! | [`SelectionMode::Multiple`] | toggles the date in the set | the whole set |
//! | [`SelectionMode::Range`] | first click anchors, second commits | the range, on the second click only |
//!
//! Disabled dates are never activated: the call is a no-op in every mode,
//! including the second click of a pending range.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_calendar::{Constraints, DateRange, Selection, SelectionEngine, SelectionMode};
//!
//! let constraints = Constraints::new();
//! let mut engine = SelectionEngine::new(SelectionMode::Range);
//!
//! let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! assert_eq!(engine.activate(jan(10), &constraints), None);
//! assert_eq!(
//!     engine.activate(jan(5), &constraints),
//!     Some(Selection::Range(Some(DateRange::new(jan(5), jan(10))))),
//! );
//! ```

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use horizon_calendar_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;

/// Selection behavior of a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One date at a time (default).
    #[default]
    Single,
    /// Any number of individually toggled dates.
    Multiple,
    /// A contiguous span picked with two clicks.
    Range,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Range => "range",
        })
    }
}

/// An inclusive span of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range covering both dates, whichever order they come in.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, bounds included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A selection value, shaped by the mode that produced it.
///
/// This is both what the host seeds the engine with and what the engine
/// reports after an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The selected date in single mode.
    Single(Option<NaiveDate>),
    /// The selected dates in multiple mode, in the order they were added.
    Multiple(Vec<NaiveDate>),
    /// The committed range in range mode.
    Range(Option<DateRange>),
}

impl Selection {
    /// The empty selection for `mode`.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
            SelectionMode::Range => Self::Range(None),
        }
    }

    /// The mode this value belongs to.
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
            Self::Range(_) => SelectionMode::Range,
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Multiple(values) => values.is_empty(),
            Self::Range(range) => range.is_none(),
        }
    }
}

#[derive(Debug, Clone)]
enum SelectionState {
    Single {
        value: Option<NaiveDate>,
    },
    Multiple {
        /// Selected dates in insertion order.
        values: Vec<NaiveDate>,
        /// Same dates, for O(1) membership tests.
        members: HashSet<NaiveDate>,
    },
    Range {
        /// Cleared as soon as a range is committed.
        pending_anchor: Option<NaiveDate>,
        committed: Option<DateRange>,
    },
}

impl SelectionState {
    fn from_selection(selection: Selection) -> Self {
        match selection {
            Selection::Single(value) => Self::Single { value },
            Selection::Multiple(dates) => {
                let mut members = HashSet::with_capacity(dates.len());
                let values = dates.into_iter().filter(|d| members.insert(*d)).collect();
                Self::Multiple { values, members }
            }
            Selection::Range(committed) => Self::Range {
                pending_anchor: None,
                committed,
            },
        }
    }

    fn mode(&self) -> SelectionMode {
        match self {
            Self::Single { .. } => SelectionMode::Single,
            Self::Multiple { .. } => SelectionMode::Multiple,
            Self::Range { .. } => SelectionMode::Range,
        }
    }
}

/// Tracks the selection of a calendar in one fixed mode.
///
/// The mode is chosen at construction and never changes; the engine never
/// holds state for more than one mode.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    state: SelectionState,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl SelectionEngine {
    /// Creates an engine with an empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_selection(Selection::empty(mode))
    }

    /// Creates an engine seeded with `selection`; its variant fixes the mode.
    ///
    /// Duplicate dates in a multiple selection are dropped.
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            state: SelectionState::from_selection(selection),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.state.mode()
    }

    /// The current selection value.
    pub fn selection(&self) -> Selection {
        match &self.state {
            SelectionState::Single { value } => Selection::Single(*value),
            SelectionState::Multiple { values, .. } => Selection::Multiple(values.clone()),
            SelectionState::Range { committed, .. } => Selection::Range(*committed),
        }
    }

    /// The first click of a range that has not been committed yet.
    pub fn pending_anchor(&self) -> Option<NaiveDate> {
        match &self.state {
            SelectionState::Range { pending_anchor, .. } => *pending_anchor,
            _ => None,
        }
    }

    /// Replaces the selection with a host-supplied value.
    ///
    /// A value for a different mode is ignored and `false` is returned.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if selection.mode() != self.mode() {
            tracing::warn!(
                target: targets::SELECTION,
                engine_mode = %self.mode(),
                value_mode = %selection.mode(),
                "ignoring selection for a different mode"
            );
            return false;
        }
        self.state = SelectionState::from_selection(selection);
        true
    }

    /// Clears the selection, including any pending range anchor, and returns
    /// the empty value to report.
    pub fn clear(&mut self) -> Selection {
        let empty = Selection::empty(self.mode());
        self.state = SelectionState::from_selection(empty.clone());
        empty
    }

    /// Drops a pending range anchor. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match &mut self.state {
            SelectionState::Range { pending_anchor, .. } => pending_anchor.take().is_some(),
            _ => false,
        }
    }

    /// Activates `date`, returning the value to report, if any.
    ///
    /// Disabled dates are ignored without touching any state. In range mode
    /// the first activation only records the anchor and returns `None`.
    pub fn activate(&mut self, date: NaiveDate, constraints: &Constraints) -> Option<Selection> {
        if constraints.is_disabled(date) {
            tracing::trace!(target: targets::SELECTION, %date, "ignoring activation of disabled date");
            return None;
        }

        match &mut self.state {
            SelectionState::Single { value } => {
                *value = Some(date);
                tracing::trace!(target: targets::SELECTION, %date, "single date selected");
                Some(Selection::Single(Some(date)))
            }
            SelectionState::Multiple { values, members } => {
                if members.remove(&date) {
                    values.retain(|d| *d != date);
                    tracing::trace!(target: targets::SELECTION, %date, "date removed from selection");
                } else {
                    members.insert(date);
                    values.push(date);
                    tracing::trace!(target: targets::SELECTION, %date, "date added to selection");
                }
                Some(Selection::Multiple(values.clone()))
            }
            SelectionState::Range {
                pending_anchor,
                committed,
            } => match pending_anchor.take() {
                None => {
                    *pending_anchor = Some(date);
                    tracing::trace!(target: targets::SELECTION, anchor = %date, "range anchor set");
                    None
                }
                Some(anchor) => {
                    let range = DateRange::new(anchor, date);
                    *committed = Some(range);
                    tracing::trace!(target: targets::SELECTION, %range, "range committed");
                    Some(Selection::Range(Some(range)))
                }
            },
        }
    }

    /// Whether `date` is shown as selected.
    ///
    /// In range mode this covers the committed range and the pending anchor.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match &self.state {
            SelectionState::Single { value } => *value == Some(date),
            SelectionState::Multiple { members, .. } => members.contains(&date),
            SelectionState::Range {
                pending_anchor,
                committed,
            } => {
                *pending_anchor == Some(date) || committed.is_some_and(|range| range.contains(date))
            }
        }
    }
}
