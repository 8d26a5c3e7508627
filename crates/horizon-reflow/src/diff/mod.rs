//! Sequence diffing.
//!
//! Two independent strategies turn an old and a new sequence into an
//! [`OperationSet`]:
//!
//! | strategy | function | keeps identity | cost |
//! |---|---|---|---|
//! | count delta | [`diff_by_count`] | no, everything is reloaded | lengths only |
//! | identity | [`diff_by_identity`] | yes, shared items move | two hash maps |
//!
//! Both are pure and never fail. Picking one is up to the caller, usually
//! through [`DiffStrategy`].

mod count;
mod identity;
mod operation;

use serde::{Deserialize, Serialize};

use crate::model::Item;

pub use count::diff_by_count;
pub use identity::diff_by_identity;
pub use operation::{Operation, OperationKind, OperationSet};

/// Selects which diff function an update uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStrategy {
    /// Tail inserts/removes plus full reload ([`diff_by_count`]).
    Count,
    /// Moves, inserts and removes by item identity ([`diff_by_identity`]).
    #[default]
    Identity,
}

impl DiffStrategy {
    /// Runs the selected diff.
    pub fn diff<T: Item>(self, old: &[T], new: &[T]) -> OperationSet {
        match self {
            Self::Count => diff_by_count(old, new),
            Self::Identity => diff_by_identity(old, new),
        }
    }

    /// Short lowercase name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Identity => "identity",
        }
    }
}
