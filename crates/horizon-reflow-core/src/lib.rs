//! Core systems for Horizon Reflow.
//!
//! This crate provides the pieces shared by every Horizon Reflow component:
//!
//! - **Signal/Slot System**: Type-safe change notification between the
//!   sequence model, the controller and the collection view
//! - **Logging**: `tracing` targets, span names and helper macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_reflow_core::Signal;
//!
//! let batch_committed = Signal::<(usize, usize)>::new();
//!
//! batch_committed.connect(|(inserted, removed)| {
//!     println!("{inserted} inserted, {removed} removed");
//! });
//!
//! batch_committed.emit((2, 1));
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
