//! Count-delta diff.
//!
//! Treats every surviving position as a full content refresh and only
//! inserts or removes at the tail. No move animations.

use std::cmp::Ordering;

use horizon_reflow_core::logging::targets;

use crate::model::ItemPosition;

use super::operation::OperationSet;

/// Computes the count-delta operation set between two sequences.
///
/// - Grown: inserts `len(old)..len(new)`, reloads `0..len(old)`.
/// - Shrunk: removes `len(new)..len(old)`, reloads `0..len(new)`.
/// - Same length: reloads `0..len(old)`.
///
/// Only the lengths are inspected, so `T` needs no bounds.
///
/// # Example
///
/// ```
/// use horizon_reflow::diff::diff_by_count;
/// use horizon_reflow::model::ItemPosition;
///
/// let ops = diff_by_count(&["red", "green", "blue"], &["red", "green", "blue", "yellow"]);
/// assert_eq!(ops.insertions(), &[ItemPosition::new(3)]);
/// assert_eq!(ops.reloads().len(), 3);
/// ```
pub fn diff_by_count<T>(old: &[T], new: &[T]) -> OperationSet {
    let mut operations = OperationSet::new();
    let (old_len, new_len) = (old.len(), new.len());

    let surviving = match old_len.cmp(&new_len) {
        Ordering::Less => {
            ItemPosition::range(old_len..new_len).for_each(|pos| operations.push_insert(pos));
            old_len
        }
        Ordering::Greater => {
            ItemPosition::range(new_len..old_len).for_each(|pos| operations.push_remove(pos));
            new_len
        }
        Ordering::Equal => old_len,
    };
    ItemPosition::range(0..surviving).for_each(|pos| operations.push_reload(pos));

    tracing::debug!(
        target: targets::DIFF,
        strategy = "count",
        old_len,
        new_len,
        %operations,
        "diff computed"
    );
    operations
}
