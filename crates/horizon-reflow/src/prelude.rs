//! Prelude module for Horizon Reflow.
//!
//! ```ignore
//! use horizon_reflow::prelude::*;
//! ```

// ============================================================================
// Model and Diffing
// ============================================================================

pub use crate::diff::{DiffStrategy, OperationSet, diff_by_count, diff_by_identity};
pub use crate::model::{Item, ItemPosition, SequenceModel, Tagged};

// ============================================================================
// Batches and Views
// ============================================================================

pub use crate::batch::{BatchApplier, VisualCollection, apply_update};
pub use crate::view::{CollectionView, Easing, ListLayout, PresentationAdapter, SwatchAdapter};

// ============================================================================
// Orchestration
// ============================================================================

pub use crate::config::CollectionConfig;
pub use crate::controller::{CollectionController, UpdateRequest, UpdateSender};
pub use crate::source::{ColorService, ItemSource, TaggedSource};

// ============================================================================
// Errors and Notification
// ============================================================================

pub use crate::error::{BatchError, Error, UpdateError};
pub use crate::palette::Color;
pub use horizon_reflow_core::Signal;
