//! Horizon Reflow - animated batch updates for list views.
//!
//! Given the sequence a view shows and the sequence it should show next,
//! Horizon Reflow computes the insertions, removals, moves and reloads that
//! turn one into the other and submits them to the view as one atomic batch,
//! so every change animates together.
//!
//! - [`diff`]: the two diff strategies, count delta and identity
//! - [`batch`]: the [`VisualCollection`](batch::VisualCollection) contract,
//!   validation and [`apply_update`](batch::apply_update)
//! - [`view`]: an in-memory collection view with cell reuse and animations
//! - [`controller`]: store, diff and apply in one call, plus a cross-thread
//!   update queue
//! - [`source`]: item sources, including the swatch [`ColorService`](source::ColorService)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_reflow::prelude::*;
//!
//! fn main() -> horizon_reflow::Result<()> {
//!     let mut colors = ColorService::with_seed(42);
//!     let model = Arc::new(SequenceModel::new(colors.initial()));
//!     let view = CollectionView::new(model.clone(), SwatchAdapter);
//!     let mut controller = CollectionController::new(model, view);
//!
//!     let next = colors.with_one_replaced_and_one_added(&controller.current())?;
//!     let operations = controller.update(next)?;
//!     assert_eq!(operations.insertions().len(), 2);
//!
//!     while controller.view_mut().advance(std::time::Duration::from_millis(16)) {}
//!     Ok(())
//! }
//! ```

pub use horizon_reflow_core::*;

pub mod batch;
pub mod config;
pub mod controller;
pub mod diff;
pub mod error;
pub mod model;
pub mod palette;
pub mod prelude;
pub mod source;
pub mod view;

pub use error::{Error, Result};
