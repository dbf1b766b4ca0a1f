//! Horizon Calendar - the behavior behind a month-view date picker.
//!
//! This crate computes everything a calendar widget shows and does, leaving
//! drawing and event plumbing to the host:
//!
//! - **Grid**: week-aligned day cells for the displayed month
//! - **Constraints**: disabled dates and min/max bounds
//! - **Selection**: single, multiple and two-click range modes
//! - **Navigation**: month paging and arrow-key focus movement
//! - **Labels**: accessible day labels with optional custom patterns
//!
//! All dates are calendar days ([`chrono::NaiveDate`]); timestamps passed in
//! through [`ToCalendarDate`] are truncated to the day.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use horizon_calendar::{Calendar, Selection, SelectionMode};
//!
//! let mut calendar = Calendar::new()
//!     .with_seed("2024-02-14")
//!     .with_mode(SelectionMode::Range)
//!     .with_disabled_dates(["2024-02-19"]);
//!
//! let feb = |d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
//! calendar.activate(feb(12));
//! calendar.activate(feb(19)); // disabled: ignored
//! let selection = calendar.activate(feb(16)).unwrap();
//!
//! let Selection::Range(Some(range)) = selection else { unreachable!() };
//! assert_eq!((range.start(), range.end()), (feb(12), feb(16)));
//! assert_eq!(calendar.cells().iter().filter(|c| c.selected).count(), 5);
//! ```

pub mod calendar;
pub mod config;
pub mod constraints;
pub mod date;
pub mod error;
pub mod format;
pub mod grid;
pub mod navigation;
pub mod selection;

pub use horizon_calendar_core::{ConnectionId, Signal};

pub use calendar::Calendar;
pub use config::CalendarConfig;
pub use constraints::Constraints;
pub use date::{DisplayedMonth, ToCalendarDate, day_key, same_day};
pub use error::{Error, Result};
pub use format::{DateFormat, LabelFormatter, default_label, label};
pub use grid::{DAYS_PER_WEEK, DayCell, build_cells, build_grid, weekday_headers, weeks};
pub use navigation::{
    FocusMove, FocusRequest, Key, KeyPress, NavigationController, PageDirection,
};
pub use selection::{DateRange, Selection, SelectionEngine, SelectionMode};
