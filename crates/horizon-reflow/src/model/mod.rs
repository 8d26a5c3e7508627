//! Data model for collection updates.
//!
//! - `ItemPosition`: Addresses a slot in a visual collection
//! - `Item`: Bound for values that can be diffed by identity
//! - `Tagged` / `ItemId`: Explicit identity for values that may repeat
//! - `SequenceModel`: The authoritative current sequence, shared between
//!   the controller and the view

mod item;
mod position;
mod sequence_model;

pub use item::{Item, ItemId, Tagged, retag};
pub use position::{DEFAULT_SECTION, ItemPosition};
pub use sequence_model::SequenceModel;
