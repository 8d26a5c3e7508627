//! Logging conventions for Horizon Reflow.
//!
//! Horizon Reflow uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_reflow=debug"))
//!     .init();
//! ```
//!
//! Every subsystem logs under its own target so filters can be narrowed to,
//! for example, only the diff engine (`horizon_reflow::diff=trace`).

/// Span names used throughout Horizon Reflow for tracing.
pub mod span_names {
    /// Full diff-and-apply cycle of one update.
    pub const UPDATE: &str = "horizon_reflow::update";
}

/// Target names for log filtering.
///
/// Every event in the workspace is logged under one of these.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_reflow_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_reflow_core::signal";
    /// Diff engine target.
    pub const DIFF: &str = "horizon_reflow::diff";
    /// Batch applier target.
    pub const BATCH: &str = "horizon_reflow::batch";
    /// Collection view target.
    pub const VIEW: &str = "horizon_reflow::view";
    /// Controller and update queue target.
    pub const CONTROLLER: &str = "horizon_reflow::controller";
    /// Item source target.
    pub const SOURCE: &str = "horizon_reflow::source";
    /// Sequence model target.
    pub const MODEL: &str = "horizon_reflow::model";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_reflow::config";
    /// Performance span target.
    pub const PERF: &str = "horizon_reflow::perf";
}

/// Keeps an info-level `perf` span entered while alive.
///
/// Used to measure the duration of an update cycle.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enters a span tagged with `operation = name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros that fix the target to the
/// core crate.
#[macro_export]
macro_rules! reflow_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! reflow_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
