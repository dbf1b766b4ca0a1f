//! Logging facilities for Horizon Calendar.
//!
//! Horizon Calendar uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_calendar=debug")
//!         .init();
//! }
//! ```
//!
//! The constants in [`targets`] can be used in filter directives to narrow
//! output to a single subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_calendar_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_calendar_core::signal";
    /// Date parsing and conversion target.
    pub const DATE: &str = "horizon_calendar::date";
    /// Date grid assembly target.
    pub const GRID: &str = "horizon_calendar::grid";
    /// Selection engine target.
    pub const SELECTION: &str = "horizon_calendar::selection";
    /// Month paging and keyboard focus target.
    pub const NAVIGATION: &str = "horizon_calendar::navigation";
    /// Label formatting target.
    pub const FORMAT: &str = "horizon_calendar::format";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_calendar::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_calendar::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
