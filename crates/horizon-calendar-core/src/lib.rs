//! Core systems for Horizon Calendar.
//!
//! This crate provides the plumbing that calendar engines use to talk to
//! the host that renders them:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Example
//!
//! ```
//! use horizon_calendar_core::{Property, Signal};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let value = Property::new(0);
//! let value_changed = Signal::<i32>::new();
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let hits_clone = hits.clone();
//! value_changed.connect(move |_| {
//!     hits_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! for v in [1, 1, 2] {
//!     if value.set(v) {
//!         value_changed.emit(v);
//!     }
//! }
//! assert_eq!(hits.load(Ordering::SeqCst), 2);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionId, Signal};
