//! An in-memory collection view.
//!
//! [`CollectionView`] is a [`VisualCollection`] that keeps real cell state:
//! every shown item owns a [`CellHandle`] in a slot map, cells leaving the
//! view fade out and go back to a reuse pool, and each committed batch starts
//! per-cell animations that [`advance`](CollectionView::advance) drives.
//!
//! The view reads item content from the shared [`SequenceModel`], which must
//! already hold the new sequence when a batch is committed.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use slotmap::{SecondaryMap, SlotMap};

use horizon_reflow_core::Signal;
use horizon_reflow_core::logging::targets;

use crate::batch::{SlotOrigin, VisualCollection, resolve};
use crate::config::CollectionConfig;
use crate::diff::OperationSet;
use crate::error::BatchError;
use crate::model::{Item, ItemPosition, SequenceModel};

use super::adapter::PresentationAdapter;
use super::animation::{CellAnimation, Easing, Fade};
use super::cell::{CellHandle, CellId};
use super::layout::ListLayout;

/// What one committed batch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Items shown before the batch.
    pub before: usize,
    /// Items shown after the batch.
    pub after: usize,
    pub inserted: usize,
    pub removed: usize,
    pub moved: usize,
    pub reloaded: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} items ({} inserted, {} removed, {} moved, {} reloaded)",
            self.before, self.after, self.inserted, self.removed, self.moved, self.reloaded
        )
    }
}

/// A vertical list of cells showing the items of a [`SequenceModel`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_reflow::batch::apply_update;
/// use horizon_reflow::diff::diff_by_identity;
/// use horizon_reflow::model::SequenceModel;
/// use horizon_reflow::palette::Color;
/// use horizon_reflow::view::{CollectionView, SwatchAdapter};
///
/// let model = Arc::new(SequenceModel::new(vec![Color::RED, Color::GREEN]));
/// let mut view = CollectionView::new(model.clone(), SwatchAdapter);
///
/// let old = model.replace(vec![Color::GREEN, Color::RED, Color::BLUE]);
/// let operations = diff_by_identity(&old, &model.snapshot());
/// apply_update(&operations, &mut view).unwrap();
///
/// view.finish_animations();
/// assert_eq!(view.cell_at(2).and_then(|cell| cell.background), Some(Color::BLUE));
/// ```
pub struct CollectionView<T: Item, A> {
    source: Arc<SequenceModel<T>>,
    adapter: A,
    layout: ListLayout,
    duration: Duration,
    easing: Easing,
    cells: SlotMap<CellId, CellHandle>,
    /// Cells in display order.
    visible: Vec<CellId>,
    /// Removed cells still fading out.
    retiring: Vec<CellId>,
    reuse_pool: Vec<CellId>,
    animations: SecondaryMap<CellId, CellAnimation>,
    pending: Option<OperationSet>,

    /// Emitted after a batch was committed.
    pub batch_committed: Signal<BatchSummary>,
    /// Emitted after the view was rebuilt by [`reset`](VisualCollection::reset).
    /// Args: number of items shown
    pub data_reloaded: Signal<usize>,
}

impl<T: Item, A: PresentationAdapter<T>> CollectionView<T, A> {
    /// Creates a view showing the current contents of `source`.
    pub fn new(source: Arc<SequenceModel<T>>, adapter: A) -> Self {
        let mut view = Self {
            source,
            adapter,
            layout: ListLayout::default(),
            duration: Duration::from_millis(
                crate::config::AnimationConfig::DEFAULT_DURATION_MS,
            ),
            easing: Easing::default(),
            cells: SlotMap::with_key(),
            visible: Vec::new(),
            retiring: Vec::new(),
            reuse_pool: Vec::new(),
            animations: SecondaryMap::new(),
            pending: None,
            batch_committed: Signal::new(),
            data_reloaded: Signal::new(),
        };
        view.populate();
        view
    }

    /// Set the row geometry. Cells jump to their new frames.
    pub fn with_layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self.finish_animations();
        self.snap_frames();
        self
    }

    /// Set the animation timing. A zero duration disables animation.
    pub fn with_animation(mut self, duration: Duration, easing: Easing) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    /// Applies the layout and animation sections of `config`.
    pub fn with_config(self, config: &CollectionConfig) -> Self {
        self.with_layout(config.layout.to_layout())
            .with_animation(config.animation.duration(), config.animation.easing)
    }

    /// The data source.
    pub fn source(&self) -> &Arc<SequenceModel<T>> {
        &self.source
    }

    /// The presentation adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The row geometry.
    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    /// Number of cells shown.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns `true` if no cells are shown.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// ID of the cell shown at `index`.
    pub fn cell_id_at(&self, index: usize) -> Option<CellId> {
        self.visible.get(index).copied()
    }

    /// The cell shown at `index`.
    pub fn cell_at(&self, index: usize) -> Option<&CellHandle> {
        self.cell_id_at(index).and_then(|id| self.cells.get(id))
    }

    /// Looks up a cell by ID, including retiring and pooled cells.
    pub fn cell(&self, id: CellId) -> Option<&CellHandle> {
        self.cells.get(id)
    }

    /// Shown cells in display order.
    pub fn visible_cells(&self) -> impl Iterator<Item = &CellHandle> + '_ {
        self.visible.iter().filter_map(|&id| self.cells.get(id))
    }

    /// Removed cells that are still fading out.
    pub fn retiring_cells(&self) -> impl Iterator<Item = &CellHandle> + '_ {
        self.retiring.iter().filter_map(|&id| self.cells.get(id))
    }

    /// Number of cells waiting in the reuse pool.
    pub fn reusable_count(&self) -> usize {
        self.reuse_pool.len()
    }

    /// Number of cells ever allocated and still owned by the view.
    pub fn allocated_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` while any cell animation is running.
    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Returns `true` between `begin_updates` and `end_updates`.
    pub fn is_batch_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Total height of the shown rows.
    pub fn content_height(&self) -> f32 {
        self.layout.content_height(self.visible.len())
    }

    /// Advances every running animation by `delta`.
    ///
    /// Finished fade-outs return their cell to the reuse pool. Returns whether
    /// animations are still running.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let mut finished = Vec::new();
        for (id, animation) in self.animations.iter_mut() {
            let done = animation.advance(delta);
            if let Some(cell) = self.cells.get_mut(id) {
                apply_animation(animation, cell);
            }
            if done {
                finished.push(id);
            }
        }
        for id in finished {
            self.animations.remove(id);
        }

        let (done, still_fading): (Vec<_>, Vec<_>) = std::mem::take(&mut self.retiring)
            .into_iter()
            .partition(|&id| !self.animations.contains_key(id));
        self.retiring = still_fading;
        for id in done {
            self.recycle(id);
        }

        tracing::trace!(
            target: targets::VIEW,
            ?delta,
            running = self.animations.len(),
            "animations advanced"
        );
        self.is_animating()
    }

    /// Jumps every running animation to its end state.
    pub fn finish_animations(&mut self) {
        for (id, animation) in self.animations.iter_mut() {
            animation.finish();
            if let Some(cell) = self.cells.get_mut(id) {
                apply_animation(animation, cell);
            }
        }
        self.animations.clear();
        for id in std::mem::take(&mut self.retiring) {
            self.recycle(id);
        }
    }

    fn new_animation(&self) -> CellAnimation {
        CellAnimation::new(self.duration, self.easing)
    }

    fn dequeue_reusable_cell(&mut self) -> CellId {
        match self.reuse_pool.pop() {
            Some(id) => {
                if let Some(cell) = self.cells.get_mut(id) {
                    cell.reuse_count += 1;
                }
                id
            }
            None => self.cells.insert(CellHandle::new()),
        }
    }

    fn recycle(&mut self, id: CellId) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.prepare_for_reuse();
            self.reuse_pool.push(id);
        }
    }

    fn render(&mut self, id: CellId, item: &T) {
        if let Some(cell) = self.cells.get_mut(id) {
            self.adapter.render(item, cell);
        }
    }

    /// Renders `item` into a retained cell if that changes its content.
    ///
    /// Returns whether the cell was redrawn.
    fn refresh(&mut self, id: CellId, item: &T) -> bool {
        let Some(cell) = self.cells.get_mut(id) else {
            return false;
        };
        let mut fresh = cell.clone();
        self.adapter.render(item, &mut fresh);
        if fresh.background == cell.background && fresh.label == cell.label {
            return false;
        }
        cell.background = fresh.background;
        cell.label = fresh.label;
        true
    }

    fn snap_frames(&mut self) {
        for (index, &id) in self.visible.iter().enumerate() {
            if let Some(cell) = self.cells.get_mut(id) {
                cell.frame = self.layout.frame_for(index);
            }
        }
    }

    /// Fills the view from the data source without animation.
    fn populate(&mut self) {
        let items = self.source.snapshot();
        for (index, item) in items.iter().enumerate() {
            let id = self.dequeue_reusable_cell();
            if let Some(cell) = self.cells.get_mut(id) {
                cell.frame = self.layout.frame_for(index);
                cell.opacity = 1.0;
            }
            self.render(id, item);
            self.visible.push(id);
        }
    }

    fn commit(&mut self, batch: &OperationSet) -> Result<BatchSummary, BatchError> {
        let before = self.visible.len();
        let resolved = resolve(before, batch)?;
        let items = self.source.snapshot();
        if resolved.len() != items.len() {
            return Err(BatchError::CountMismatch {
                expected: items.len(),
                actual: resolved.len(),
            });
        }

        // Nothing below can fail.
        self.finish_animations();
        let animate = !self.duration.is_zero();
        let old_visible = std::mem::take(&mut self.visible);
        let mut visible = Vec::with_capacity(resolved.len());

        for (index, (origin, item)) in resolved.slots().iter().zip(&items).enumerate() {
            let target = self.layout.frame_for(index);
            let mut animation = self.new_animation();
            let id = match *origin {
                SlotOrigin::Inserted => {
                    let id = self.dequeue_reusable_cell();
                    self.render(id, item);
                    animation = animation.with_fade(Fade::In);
                    id
                }
                SlotOrigin::Moved { from } | SlotOrigin::Kept { from, .. } => {
                    let id = old_visible[from];
                    let from_y = self.cells.get(id).map_or(target.y, |cell| cell.frame.y);
                    if from_y != target.y {
                        animation = animation.with_slide(from_y, target.y);
                    }
                    // Equal items may still differ in content, e.g. a `Tagged`
                    // whose value changed under the same ID.
                    let redrawn = if origin.needs_render() {
                        self.render(id, item);
                        true
                    } else {
                        self.refresh(id, item)
                    };
                    if redrawn {
                        animation = animation.with_fade(Fade::Cross);
                    }
                    id
                }
            };

            if let Some(cell) = self.cells.get_mut(id) {
                cell.frame = target;
                cell.opacity = 1.0;
                if animate && !animation.is_noop() {
                    apply_animation(&animation, cell);
                    self.animations.insert(id, animation);
                }
            }
            visible.push(id);
        }
        self.visible = visible;

        for &from in resolved.removed() {
            let id = old_visible[from];
            if animate {
                let animation = self.new_animation().with_fade(Fade::Out);
                if let Some(cell) = self.cells.get_mut(id) {
                    apply_animation(&animation, cell);
                }
                self.animations.insert(id, animation);
                self.retiring.push(id);
            } else {
                self.recycle(id);
            }
        }

        Ok(BatchSummary {
            before,
            after: self.visible.len(),
            inserted: batch.insertions().len(),
            removed: batch.removals().len(),
            moved: batch.moves().len(),
            reloaded: batch.reloads().len(),
        })
    }

    fn pending_batch(&mut self) -> &mut OperationSet {
        if self.pending.is_none() {
            tracing::warn!(
                target: targets::VIEW,
                "operation recorded outside begin_updates; opening a batch"
            );
        }
        self.pending.get_or_insert_with(OperationSet::new)
    }
}

fn apply_animation(animation: &CellAnimation, cell: &mut CellHandle) {
    if let Some(y) = animation.y() {
        cell.frame.y = y;
    }
    cell.opacity = animation.opacity();
}

impl<T: Item, A: PresentationAdapter<T>> VisualCollection for CollectionView<T, A> {
    fn item_count(&self) -> usize {
        self.visible.len()
    }

    fn begin_updates(&mut self) {
        if self.pending.is_some() {
            tracing::debug!(
                target: targets::VIEW,
                "nested begin_updates joins the open batch"
            );
            return;
        }
        self.pending = Some(OperationSet::new());
    }

    fn remove_items(&mut self, positions: &[ItemPosition]) {
        let batch = self.pending_batch();
        positions.iter().for_each(|&p| batch.push_remove(p));
    }

    fn insert_items(&mut self, positions: &[ItemPosition]) {
        let batch = self.pending_batch();
        positions.iter().for_each(|&p| batch.push_insert(p));
    }

    fn move_item(&mut self, from: ItemPosition, to: ItemPosition) {
        self.pending_batch().push_move(from, to);
    }

    fn reload_items(&mut self, positions: &[ItemPosition]) {
        let batch = self.pending_batch();
        positions.iter().for_each(|&p| batch.push_reload(p));
    }

    fn end_updates(&mut self) -> Result<(), BatchError> {
        let batch = self.pending.take().unwrap_or_default();
        match self.commit(&batch) {
            Ok(summary) => {
                tracing::debug!(target: targets::VIEW, %summary, "batch committed");
                self.batch_committed.emit(summary);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: targets::VIEW, %err, "batch discarded");
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.pending = None;
        self.finish_animations();
        for id in std::mem::take(&mut self.visible) {
            self.recycle(id);
        }
        self.populate();
        tracing::debug!(target: targets::VIEW, items = self.visible.len(), "view reset");
        self.data_reloaded.emit(self.visible.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::apply_update;
    use crate::diff::diff_by_identity;
    use crate::palette::Color;
    use crate::view::SwatchAdapter;
    use parking_lot::Mutex;

    const STEP: Duration = Duration::from_millis(100);

    fn view_of(colors: &[Color]) -> CollectionView<Color, SwatchAdapter> {
        let model = Arc::new(SequenceModel::new(colors.to_vec()));
        CollectionView::new(model, SwatchAdapter)
            .with_animation(Duration::from_millis(300), Easing::Linear)
    }

    fn backgrounds(view: &CollectionView<Color, SwatchAdapter>) -> Vec<Option<Color>> {
        view.visible_cells().map(|cell| cell.background).collect()
    }

    fn update(view: &mut CollectionView<Color, SwatchAdapter>, new: &[Color]) {
        let old = view.source().replace(new.to_vec());
        let operations = diff_by_identity(&old, new);
        apply_update(&operations, view).unwrap();
    }

    #[test]
    fn test_initial_cells() {
        let view = view_of(&[Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(view.len(), 3);
        assert_eq!(
            backgrounds(&view),
            vec![Some(Color::RED), Some(Color::GREEN), Some(Color::BLUE)]
        );
        assert_eq!(view.cell_at(2).map(|c| c.frame().y), Some(120.0));
        assert_eq!(view.content_height(), 180.0);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_shuffle_moves_cells() {
        let mut view = view_of(&[Color::RED, Color::GREEN, Color::BLUE]);
        let red = view.cell_id_at(0).unwrap();

        update(&mut view, &[Color::GREEN, Color::BLUE, Color::RED]);
        assert_eq!(view.cell_id_at(2), Some(red));
        assert_eq!(view.allocated_count(), 3);

        // Red slides from the top to the bottom row.
        assert_eq!(view.cell(red).map(|c| c.frame().y), Some(0.0));
        view.advance(Duration::from_millis(150));
        let halfway = view.cell(red).map_or(0.0, |c| c.frame().y);
        assert!((halfway - 60.0).abs() < 1e-3);
        assert!(!view.advance(Duration::from_millis(150)));
        assert_eq!(view.cell(red).map(|c| c.frame().y), Some(120.0));

        assert_eq!(
            backgrounds(&view),
            vec![Some(Color::GREEN), Some(Color::BLUE), Some(Color::RED)]
        );
    }

    #[test]
    fn test_removed_cells_fade_out_and_are_reused() {
        let mut view = view_of(&[Color::RED, Color::GREEN, Color::BLUE]);
        let green = view.cell_id_at(1).unwrap();

        update(&mut view, &[Color::RED, Color::BLUE]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.retiring_cells().count(), 1);
        assert_eq!(view.cell(green).map(|c| c.opacity()), Some(1.0));

        while view.advance(STEP) {}
        assert_eq!(view.retiring_cells().count(), 0);
        assert_eq!(view.reusable_count(), 1);

        update(&mut view, &[Color::RED, Color::BLUE, Color::YELLOW]);
        assert_eq!(view.cell_id_at(2), Some(green));
        assert_eq!(view.cell(green).map(|c| c.reuse_count()), Some(1));
        assert_eq!(view.cell(green).map(|c| c.opacity()), Some(0.0));
        assert_eq!(view.allocated_count(), 3);

        view.finish_animations();
        assert_eq!(view.cell_at(2).and_then(|c| c.background), Some(Color::YELLOW));
        assert_eq!(view.cell_at(2).map(|c| c.opacity()), Some(1.0));
    }

    #[test]
    fn test_new_batch_snaps_running_animations() {
        let mut view = view_of(&[Color::RED, Color::GREEN]);
        update(&mut view, &[Color::GREEN, Color::RED]);
        view.advance(STEP);
        assert!(view.is_animating());

        update(&mut view, &[Color::GREEN, Color::RED, Color::BLUE]);
        // Red and green were snapped into place, only the insertion runs.
        assert_eq!(view.cell_at(0).map(|c| c.frame().y), Some(0.0));
        assert_eq!(view.cell_at(1).map(|c| c.frame().y), Some(60.0));
        assert_eq!(view.cell_at(2).map(|c| c.opacity()), Some(0.0));
    }

    #[test]
    fn test_stationary_move_animates_nothing() {
        let mut view = view_of(&[Color::RED, Color::GREEN]);
        let mut operations = OperationSet::new();
        operations.push_move(ItemPosition::new(0), ItemPosition::new(0));
        operations.push_move(ItemPosition::new(1), ItemPosition::new(1));

        apply_update(&operations, &mut view).unwrap();
        assert!(!view.is_animating());
    }

    #[test]
    fn test_reload_is_idempotent() {
        let mut view = view_of(&[Color::RED, Color::GREEN]);
        let ids: Vec<_> = (0..2).filter_map(|i| view.cell_id_at(i)).collect();
        let mut operations = OperationSet::new();
        operations.push_reload(ItemPosition::new(0));
        operations.push_reload(ItemPosition::new(1));

        apply_update(&operations, &mut view).unwrap();
        apply_update(&operations, &mut view).unwrap();
        view.finish_animations();

        assert_eq!(backgrounds(&view), vec![Some(Color::RED), Some(Color::GREEN)]);
        assert_eq!((0..2).filter_map(|i| view.cell_id_at(i)).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_count_mismatch_leaves_view_unchanged() {
        let mut view = view_of(&[Color::RED, Color::GREEN]);
        view.source().replace(vec![Color::RED]);

        let err = apply_update(&OperationSet::new(), &mut view).unwrap_err();
        assert_eq!(
            err,
            BatchError::CountMismatch {
                expected: 1,
                actual: 2
            }
        );
        assert_eq!(backgrounds(&view), vec![Some(Color::RED), Some(Color::GREEN)]);
        assert!(!view.is_batch_open());
    }

    #[test]
    fn test_reset_rebuilds_from_source() {
        let mut view = view_of(&[Color::RED, Color::GREEN]);
        let reloaded = Arc::new(Mutex::new(None));
        let recv = reloaded.clone();
        view.data_reloaded.connect(move |count| *recv.lock() = Some(*count));

        view.source().replace(vec![Color::BLUE, Color::YELLOW, Color::PURPLE]);
        view.reset();

        assert_eq!(
            backgrounds(&view),
            vec![Some(Color::BLUE), Some(Color::YELLOW), Some(Color::PURPLE)]
        );
        assert!(!view.is_animating());
        assert_eq!(view.allocated_count(), 3);
        assert_eq!(*reloaded.lock(), Some(3));
    }

    #[test]
    fn test_batch_committed_signal() {
        let mut view = view_of(&[Color::RED, Color::GREEN, Color::BLUE]);
        let summaries = Arc::new(Mutex::new(Vec::new()));
        let recv = summaries.clone();
        view.batch_committed.connect(move |summary| recv.lock().push(*summary));

        update(&mut view, &[Color::YELLOW, Color::GREEN, Color::BLUE, Color::PURPLE]);
        let summaries = summaries.lock();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].before, 3);
        assert_eq!(summaries[0].after, 4);
        assert_eq!(summaries[0].inserted, 2);
        assert_eq!(summaries[0].removed, 1);
    }

    #[test]
    fn test_zero_duration_commits_without_animation() {
        let model = Arc::new(SequenceModel::new(vec![Color::RED, Color::GREEN]));
        let mut view = CollectionView::new(model, SwatchAdapter)
            .with_animation(Duration::ZERO, Easing::Linear);

        update(&mut view, &[Color::GREEN]);
        assert!(!view.is_animating());
        assert_eq!(view.reusable_count(), 1);
        assert_eq!(view.cell_at(0).map(|c| c.frame().y), Some(0.0));
    }

    #[test]
    fn test_operations_outside_batch_are_collected() {
        let mut view = view_of(&[Color::RED]);
        view.source().replace(vec![Color::RED, Color::GREEN]);
        view.insert_items(&[ItemPosition::new(1)]);
        assert!(view.is_batch_open());
        view.end_updates().unwrap();
        assert_eq!(view.len(), 2);
    }
}
