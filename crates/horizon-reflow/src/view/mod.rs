//! The visual side of a collection.
//!
//! - [`CollectionView`]: the [`VisualCollection`](crate::batch::VisualCollection)
//!   that owns cells, their layout and their animations
//! - [`PresentationAdapter`]: turns an item into cell content
//! - [`CellAnimation`] and [`Easing`]: per-cell transitions started by a batch
//! - [`ListLayout`]: row geometry

mod adapter;
mod animation;
mod cell;
mod collection_view;
mod layout;

pub use adapter::{DebugLabelAdapter, PresentationAdapter, SwatchAdapter};
pub use animation::{CellAnimation, Easing, Fade, ease, lerp_eased};
pub use cell::{CellFrame, CellHandle, CellId};
pub use collection_view::{BatchSummary, CollectionView};
pub use layout::ListLayout;
