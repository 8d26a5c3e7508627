//! Atomic batch application.
//!
//! A batch is every operation of one update, submitted to a
//! [`VisualCollection`] between `begin_updates` and `end_updates` so the
//! collection can commit and animate them as a single transaction.
//!
//! # Ordering Contract
//!
//! The authoritative sequence must already hold the new items when a batch
//! is applied. Removal, reload and move-source positions refer to the old
//! layout; insertion and move-destination positions refer to the new one.
//!
//! ```text
//! store new sequence ─> diff(old, new) ─> apply_update ─> begin_updates
//!                                                          remove/insert/move/reload
//!                                                          end_updates (commit)
//! ```

mod resolve;

use horizon_reflow_core::logging::targets;

use crate::diff::OperationSet;
use crate::error::BatchError;
use crate::model::ItemPosition;

pub use resolve::{ResolvedBatch, SlotOrigin, replay, resolve};

/// A mutable visual collection that accepts batched updates.
///
/// Calls between [`begin_updates`](Self::begin_updates) and
/// [`end_updates`](Self::end_updates) only record operations; nothing is
/// visible until `end_updates` commits them together. Implementations must
/// treat a move whose source and destination coincide as a no-op.
pub trait VisualCollection {
    /// Number of items currently shown.
    fn item_count(&self) -> usize;

    /// Opens a batch.
    fn begin_updates(&mut self);

    /// Records removals at old-layout positions.
    fn remove_items(&mut self, positions: &[ItemPosition]);

    /// Records insertions at new-layout positions.
    fn insert_items(&mut self, positions: &[ItemPosition]);

    /// Records a move from an old-layout to a new-layout position.
    fn move_item(&mut self, from: ItemPosition, to: ItemPosition);

    /// Records in-place content refreshes at old-layout positions.
    fn reload_items(&mut self, positions: &[ItemPosition]);

    /// Commits the open batch as one transaction.
    ///
    /// On error the batch is discarded and the collection keeps showing
    /// what it showed before `begin_updates`.
    fn end_updates(&mut self) -> Result<(), BatchError>;

    /// Discards all content and rebuilds from the data source without
    /// animation.
    fn reset(&mut self);
}

/// Applies `operations` to `collection` as one atomic batch.
///
/// The set is validated against the collection's current item count before
/// anything is submitted; a malformed set is reported as a [`BatchError`]
/// and leaves the collection untouched. Errors are never retried: the
/// collection may have changed, so callers must diff again from the current
/// sequence.
///
/// # Example
///
/// ```ignore
/// let old = model.replace(new.clone());
/// let operations = diff_by_identity(&old, &new);
/// apply_update(&operations, &mut view)?;
/// ```
pub fn apply_update<V>(operations: &OperationSet, collection: &mut V) -> Result<(), BatchError>
where
    V: VisualCollection + ?Sized,
{
    let before = collection.item_count();
    let resolved = resolve(before, operations).inspect_err(|err| {
        tracing::warn!(target: targets::BATCH, %err, "rejected malformed batch");
    })?;

    collection.begin_updates();
    if !operations.removals().is_empty() {
        collection.remove_items(operations.removals());
    }
    if !operations.insertions().is_empty() {
        collection.insert_items(operations.insertions());
    }
    for &(from, to) in operations.moves() {
        collection.move_item(from, to);
    }
    if !operations.reloads().is_empty() {
        collection.reload_items(operations.reloads());
    }
    collection.end_updates()?;

    tracing::debug!(
        target: targets::BATCH,
        before,
        after = resolved.len(),
        %operations,
        "batch applied"
    );
    Ok(())
}

/// Applies operation sets, optionally dropping stationary moves first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchApplier {
    skip_stationary_moves: bool,
}

impl BatchApplier {
    /// Creates an applier that submits every operation as computed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether moves with identical source and destination are dropped.
    pub fn with_skip_stationary_moves(mut self, skip: bool) -> Self {
        self.skip_stationary_moves = skip;
        self
    }

    /// Whether stationary moves are dropped before submission.
    pub fn skips_stationary_moves(&self) -> bool {
        self.skip_stationary_moves
    }

    /// Prepares `operations` for submission, returning the set actually applied.
    pub fn prepare(&self, operations: OperationSet) -> OperationSet {
        if self.skip_stationary_moves {
            operations.without_stationary_moves()
        } else {
            operations
        }
    }

    /// Prepares and applies `operations`, returning the set that was applied.
    pub fn apply<V>(
        &self,
        operations: OperationSet,
        collection: &mut V,
    ) -> Result<OperationSet, BatchError>
    where
        V: VisualCollection + ?Sized,
    {
        let operations = self.prepare(operations);
        apply_update(&operations, collection)?;
        Ok(operations)
    }
}
