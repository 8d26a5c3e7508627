//! The authoritative current sequence.
//!
//! `SequenceModel<T>` holds the logical list a collection view displays. The
//! controller replaces it wholesale on every update and the view reads it
//! back when it needs to render inserted or reloaded cells, so both share it
//! through an `Arc`.

use parking_lot::RwLock;

use horizon_reflow_core::Signal;
use horizon_reflow_core::logging::targets;

use super::item::Item;

/// Shared storage for the current sequence of a collection.
///
/// # Example
///
/// ```
/// use horizon_reflow::model::SequenceModel;
///
/// let model = SequenceModel::new(vec!["red", "green"]);
/// let previous = model.replace(vec!["green", "blue", "red"]);
///
/// assert_eq!(previous, vec!["red", "green"]);
/// assert_eq!(model.len(), 3);
/// assert_eq!(model.get(1), Some("blue"));
/// ```
pub struct SequenceModel<T> {
    items: RwLock<Vec<T>>,
    /// Emitted after the sequence was replaced.
    /// Args: (previous length, new length)
    pub replaced: Signal<(usize, usize)>,
}

impl<T: Item> SequenceModel<T> {
    /// Creates a model holding the given sequence.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            replaced: Signal::new(),
        }
    }

    /// Creates an empty model.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of items in the current sequence.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the current sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a clone of the item at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a copy of the current sequence.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Runs `f` with read access to the current sequence.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.read())
    }

    /// Stores a new sequence and returns the previous one.
    pub fn replace(&self, items: Vec<T>) -> Vec<T> {
        let new_len = items.len();
        let previous = std::mem::replace(&mut *self.items.write(), items);
        tracing::trace!(
            target: targets::MODEL,
            previous_len = previous.len(),
            new_len,
            "sequence replaced"
        );
        self.replaced.emit((previous.len(), new_len));
        previous
    }
}

impl<T: Item> Default for SequenceModel<T> {
    fn default() -> Self {
        Self::empty()
    }
}
