//! Operations produced by the diff engine.

use std::fmt;

use crate::model::ItemPosition;

/// The kind of an [`Operation`], used in logs and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// An item appears at a new-layout position.
    Insert,
    /// An item disappears from an old-layout position.
    Remove,
    /// An item travels from an old-layout to a new-layout position.
    Move,
    /// An item keeps its slot but its content is refreshed.
    Reload,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Move => "move",
            Self::Reload => "reload",
        };
        f.write_str(name)
    }
}

/// One atomic mutation instruction over positions.
///
/// `Remove`, `Reload` and the `from` side of `Move` address the layout
/// before the batch; `Insert` and the `to` side of `Move` address the layout
/// after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a new cell.
    Insert(ItemPosition),
    /// Remove an existing cell.
    Remove(ItemPosition),
    /// Move an existing cell.
    Move {
        /// Position in the old layout.
        from: ItemPosition,
        /// Position in the new layout.
        to: ItemPosition,
    },
    /// Refresh the content of an existing cell in place.
    Reload(ItemPosition),
}

impl Operation {
    /// Returns the kind of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Insert(_) => OperationKind::Insert,
            Self::Remove(_) => OperationKind::Remove,
            Self::Move { .. } => OperationKind::Move,
            Self::Reload(_) => OperationKind::Reload,
        }
    }
}

/// The full set of operations for one update.
///
/// Built by [`diff_by_count`](super::diff_by_count) or
/// [`diff_by_identity`](super::diff_by_identity), or by hand through the
/// `push_*` methods. Applying it is the job of
/// [`apply_update`](crate::batch::apply_update).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSet {
    removals: Vec<ItemPosition>,
    insertions: Vec<ItemPosition>,
    moves: Vec<(ItemPosition, ItemPosition)>,
    reloads: Vec<ItemPosition>,
}

impl OperationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a removal at an old-layout position.
    pub fn push_remove(&mut self, position: ItemPosition) {
        self.removals.push(position);
    }

    /// Adds an insertion at a new-layout position.
    pub fn push_insert(&mut self, position: ItemPosition) {
        self.insertions.push(position);
    }

    /// Adds a move from an old-layout to a new-layout position.
    pub fn push_move(&mut self, from: ItemPosition, to: ItemPosition) {
        self.moves.push((from, to));
    }

    /// Adds an in-place reload at an old-layout position.
    pub fn push_reload(&mut self, position: ItemPosition) {
        self.reloads.push(position);
    }

    /// Removed positions.
    pub fn removals(&self) -> &[ItemPosition] {
        &self.removals
    }

    /// Inserted positions.
    pub fn insertions(&self) -> &[ItemPosition] {
        &self.insertions
    }

    /// Moves as `(from, to)` pairs.
    pub fn moves(&self) -> &[(ItemPosition, ItemPosition)] {
        &self.moves
    }

    /// Reloaded positions.
    pub fn reloads(&self) -> &[ItemPosition] {
        &self.reloads
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.removals.len() + self.insertions.len() + self.moves.len() + self.reloads.len()
    }

    /// Returns `true` if the set holds no operations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of moves whose source and destination coincide.
    pub fn stationary_move_count(&self) -> usize {
        self.moves.iter().filter(|(from, to)| from == to).count()
    }

    /// Returns the set without moves whose source and destination coincide.
    ///
    /// Such moves change nothing visually; dropping them is optional since
    /// every visual collection treats them as no-ops anyway.
    pub fn without_stationary_moves(mut self) -> Self {
        self.moves.retain(|(from, to)| from != to);
        self
    }

    /// Iterates over all operations: removals, insertions, moves, reloads.
    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        let removals = self.removals.iter().copied().map(Operation::Remove);
        let insertions = self.insertions.iter().copied().map(Operation::Insert);
        let moves = self
            .moves
            .iter()
            .map(|&(from, to)| Operation::Move { from, to });
        let reloads = self.reloads.iter().copied().map(Operation::Reload);
        removals.chain(insertions).chain(moves).chain(reloads)
    }

    /// Number of cells after applying the set to a collection of `before` cells.
    ///
    /// Returns `None` if more removals than cells are requested.
    pub fn resulting_len(&self, before: usize) -> Option<usize> {
        before
            .checked_sub(self.removals.len())
            .and_then(|len| len.checked_add(self.insertions.len()))
    }
}

impl fmt::Display for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} removed, {} inserted, {} moved, {} reloaded",
            self.removals.len(),
            self.insertions.len(),
            self.moves.len(),
            self.reloads.len()
        )
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut set = Self::new();
        for operation in iter {
            match operation {
                Operation::Insert(pos) => set.push_insert(pos),
                Operation::Remove(pos) => set.push_remove(pos),
                Operation::Move { from, to } => set.push_move(from, to),
                Operation::Reload(pos) => set.push_reload(pos),
            }
        }
        set
    }
}
