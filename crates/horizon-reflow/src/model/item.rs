//! Item identity.
//!
//! The diff engine keys items by equality. Plain values work as long as every
//! value appears at most once in a sequence; when the same display value can
//! occur several times (two red swatches), wrap values in [`Tagged`] so each
//! occurrence carries its own [`ItemId`].

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

/// A global counter for generating unique item IDs.
static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Values that can be shown in a collection and diffed by identity.
///
/// Blanket-implemented for every type with the required bounds.
pub trait Item: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> Item for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A stable identity assigned to one occurrence of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocates a fresh, process-unique ID.
    pub fn next() -> Self {
        Self(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value paired with an [`ItemId`].
///
/// Equality and hashing look at the ID only, so two tagged reds are distinct
/// items while a tagged red keeps its identity wherever it moves.
///
/// # Example
///
/// ```
/// use horizon_reflow::model::Tagged;
///
/// let a = Tagged::new("red");
/// let b = Tagged::new("red");
/// assert_ne!(a, b);
/// assert_eq!(*a, "red");
/// ```
#[derive(Clone)]
pub struct Tagged<T> {
    id: ItemId,
    value: T,
}

impl<T> Tagged<T> {
    /// Tags a value with a fresh ID.
    pub fn new(value: T) -> Self {
        Self {
            id: ItemId::next(),
            value,
        }
    }

    /// Tags a value with an existing ID.
    pub fn with_id(id: ItemId, value: T) -> Self {
        Self { id, value }
    }

    /// Returns the identity of this occurrence.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwraps the value, dropping the identity.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Tags every value with a fresh ID.
    pub fn tag_all(values: impl IntoIterator<Item = T>) -> Vec<Self> {
        values.into_iter().map(Self::new).collect()
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> PartialEq for Tagged<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Tagged<T> {}

impl<T> Hash for Tagged<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Tagged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.value, self.id)
    }
}

/// Assigns identities to a new list of values based on a previous tagged list.
///
/// Each value reuses the ID of the earliest previous occurrence of an equal
/// value that has not been claimed yet; values with no such occurrence get a
/// fresh ID. A shuffle of `[red, red, blue]` therefore keeps all three
/// identities, and the identity diff reports pure moves.
pub fn retag<T>(previous: &[Tagged<T>], values: impl IntoIterator<Item = T>) -> Vec<Tagged<T>>
where
    T: Eq + Hash,
{
    let mut available: HashMap<&T, VecDeque<ItemId>> = HashMap::new();
    for tagged in previous {
        available.entry(&tagged.value).or_default().push_back(tagged.id);
    }

    values
        .into_iter()
        .map(|value| {
            let id = available
                .get_mut(&value)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(ItemId::next);
            Tagged::with_id(id, value)
        })
        .collect()
}
