//! Layout resolution for a batch.
//!
//! Turns an operation set into the slot-by-slot layout it produces, checking
//! every position on the way. Both validation before a batch is submitted
//! and the commit inside a collection view go through [`resolve`].

use crate::diff::{OperationKind, OperationSet};
use crate::error::BatchError;
use crate::model::{DEFAULT_SECTION, ItemPosition};

/// Where the content of a slot in the new layout comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
    /// A fresh cell for an inserted item.
    Inserted,
    /// The cell that was at `from` in the old layout, moved explicitly.
    Moved {
        /// Old-layout slot.
        from: usize,
    },
    /// The cell that was at `from`, carried along because nothing touched it
    /// except possibly a reload.
    Kept {
        /// Old-layout slot.
        from: usize,
        /// Whether the content has to be refreshed.
        reloaded: bool,
    },
}

impl SlotOrigin {
    /// The old-layout slot this content comes from, if any.
    pub fn source(&self) -> Option<usize> {
        match *self {
            Self::Inserted => None,
            Self::Moved { from } | Self::Kept { from, .. } => Some(from),
        }
    }

    /// The operation kind that produces this origin.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Inserted => OperationKind::Insert,
            Self::Moved { .. } => OperationKind::Move,
            Self::Kept { .. } => OperationKind::Reload,
        }
    }

    /// Whether the slot must be rendered from the new sequence.
    pub fn needs_render(&self) -> bool {
        matches!(self, Self::Inserted | Self::Kept { reloaded: true, .. })
    }
}

/// The layout a batch produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBatch {
    slots: Vec<SlotOrigin>,
    removed: Vec<usize>,
}

impl ResolvedBatch {
    /// Origin of every slot in the new layout, in order.
    pub fn slots(&self) -> &[SlotOrigin] {
        &self.slots
    }

    /// Old-layout slots whose cells are removed, ascending.
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }

    /// Number of slots in the new layout.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the new layout is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn check_section(kind: OperationKind, position: ItemPosition) -> Result<(), BatchError> {
    if position.section() == DEFAULT_SECTION {
        Ok(())
    } else {
        Err(BatchError::UnknownSection { kind, position })
    }
}

/// Old-layout slots and the operation that claimed each.
struct SourceClaims(Vec<Option<OperationKind>>);

impl SourceClaims {
    fn claim(&mut self, kind: OperationKind, position: ItemPosition) -> Result<(), BatchError> {
        check_section(kind, position)?;
        let bound = self.0.len();
        let slot = self
            .0
            .get_mut(position.item())
            .ok_or(BatchError::OutOfBounds {
                kind,
                position,
                bound,
            })?;
        if let Some(first) = *slot {
            return Err(BatchError::ConflictingSource {
                position,
                first,
                second: kind,
            });
        }
        *slot = Some(kind);
        Ok(())
    }
}

/// New-layout slots, filled as operations are resolved.
struct Destinations(Vec<Option<SlotOrigin>>);

impl Destinations {
    fn fill(&mut self, position: ItemPosition, origin: SlotOrigin) -> Result<(), BatchError> {
        let kind = origin.kind();
        check_section(kind, position)?;
        let bound = self.0.len();
        let slot = self
            .0
            .get_mut(position.item())
            .ok_or(BatchError::OutOfBounds {
                kind,
                position,
                bound,
            })?;
        if let Some(first) = *slot {
            return Err(BatchError::ConflictingDestination {
                position,
                first: first.kind(),
                second: kind,
            });
        }
        *slot = Some(origin);
        Ok(())
    }
}

/// Resolves `batch` against a layout of `old_len` slots.
///
/// Removals, reloads and move sources are checked against the old layout;
/// insertions and move destinations against the new one. Each old slot may
/// be claimed by at most one operation and each new slot filled at most
/// once. Old slots nobody claimed (or that are only reloaded) keep their
/// relative order and fill the remaining new slots front to back.
pub fn resolve(old_len: usize, batch: &OperationSet) -> Result<ResolvedBatch, BatchError> {
    let mut claims = SourceClaims(vec![None; old_len]);
    for &position in batch.removals() {
        claims.claim(OperationKind::Remove, position)?;
    }
    for &(from, _) in batch.moves() {
        claims.claim(OperationKind::Move, from)?;
    }
    for &position in batch.reloads() {
        claims.claim(OperationKind::Reload, position)?;
    }

    // Removals are unique and in bounds at this point.
    let new_len = old_len - batch.removals().len() + batch.insertions().len();
    let mut destinations = Destinations(vec![None; new_len]);
    for &position in batch.insertions() {
        destinations.fill(position, SlotOrigin::Inserted)?;
    }
    for &(from, to) in batch.moves() {
        destinations.fill(to, SlotOrigin::Moved { from: from.item() })?;
    }

    let mut removed = Vec::new();
    let mut kept = Vec::new();
    for (from, claim) in claims.0.iter().enumerate() {
        match claim {
            Some(OperationKind::Remove) => removed.push(from),
            Some(OperationKind::Move) => {}
            Some(OperationKind::Reload) => kept.push(SlotOrigin::Kept {
                from,
                reloaded: true,
            }),
            Some(OperationKind::Insert) | None => kept.push(SlotOrigin::Kept {
                from,
                reloaded: false,
            }),
        }
    }

    // Always equal once claims and fills succeed.
    let free = destinations.0.iter().filter(|slot| slot.is_none()).count();
    if free != kept.len() {
        return Err(BatchError::CountMismatch {
            expected: new_len,
            actual: new_len - free + kept.len(),
        });
    }

    let mut kept = kept.into_iter();
    let slots = destinations
        .0
        .into_iter()
        .filter_map(|slot| slot.or_else(|| kept.next()))
        .collect();

    Ok(ResolvedBatch { slots, removed })
}

/// Computes the sequence a collection showing `old` displays after `operations`.
///
/// Moved and untouched slots keep their old content; inserted and reloaded
/// slots take their content from `new`. For a correct diff the result equals
/// `new`.
pub fn replay<T: Clone>(
    old: &[T],
    new: &[T],
    operations: &OperationSet,
) -> Result<Vec<T>, BatchError> {
    let resolved = resolve(old.len(), operations)?;
    if resolved.len() != new.len() {
        return Err(BatchError::CountMismatch {
            expected: new.len(),
            actual: resolved.len(),
        });
    }

    let displayed = resolved
        .slots()
        .iter()
        .enumerate()
        .map(|(index, origin)| match *origin {
            SlotOrigin::Moved { from } | SlotOrigin::Kept {
                from,
                reloaded: false,
            } => old[from].clone(),
            SlotOrigin::Inserted | SlotOrigin::Kept { reloaded: true, .. } => new[index].clone(),
        })
        .collect();
    Ok(displayed)
}
