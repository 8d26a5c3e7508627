//! Identity-based diff.
//!
//! Items are matched across the two sequences by equality, so an item that
//! changes position is reported as a move and keeps its cell.

use std::collections::HashMap;
use std::hash::Hash;

use horizon_reflow_core::logging::targets;

use crate::model::ItemPosition;

use super::operation::OperationSet;

/// Maps each distinct item to the index of its last occurrence.
fn last_positions<T: Eq + Hash>(sequence: &[T]) -> HashMap<&T, usize> {
    let mut positions = HashMap::with_capacity(sequence.len());
    for (index, item) in sequence.iter().enumerate() {
        positions.insert(item, index);
    }
    positions
}

/// Computes the identity-based operation set between two sequences.
///
/// - Items only in `old` are removed at their old position.
/// - Items only in `new` are inserted at their new position.
/// - Items in both are moved from their old to their new position, even when
///   the two positions are equal.
///
/// When a value occurs more than once, only its last occurrence takes part
/// in matching. Earlier occurrences are removed (old side) and inserted (new
/// side), which keeps the set consistent with both lengths. Wrap values in
/// [`Tagged`](crate::model::Tagged) to get stable moves instead.
///
/// Removals and insertions come out in ascending order, moves ordered by
/// their source position.
///
/// # Example
///
/// ```
/// use horizon_reflow::diff::diff_by_identity;
/// use horizon_reflow::model::ItemPosition;
///
/// let ops = diff_by_identity(&["red", "green", "blue"], &["blue", "red", "green"]);
/// assert!(ops.insertions().is_empty() && ops.removals().is_empty());
/// assert_eq!(ops.moves()[2], (ItemPosition::new(2), ItemPosition::new(0)));
/// ```
pub fn diff_by_identity<T: Eq + Hash>(old: &[T], new: &[T]) -> OperationSet {
    let previous = last_positions(old);
    let next = last_positions(new);
    let mut operations = OperationSet::new();

    for (index, item) in old.iter().enumerate() {
        let is_last_occurrence = previous.get(item) == Some(&index);
        match next.get(item) {
            Some(&to) if is_last_occurrence => {
                operations.push_move(ItemPosition::new(index), ItemPosition::new(to));
            }
            _ => operations.push_remove(ItemPosition::new(index)),
        }
    }

    for (index, item) in new.iter().enumerate() {
        let is_last_occurrence = next.get(item) == Some(&index);
        if !is_last_occurrence || !previous.contains_key(item) {
            operations.push_insert(ItemPosition::new(index));
        }
    }

    tracing::debug!(
        target: targets::DIFF,
        strategy = "identity",
        old_len = old.len(),
        new_len = new.len(),
        stationary_moves = operations.stationary_move_count(),
        %operations,
        "diff computed"
    );
    operations
}
