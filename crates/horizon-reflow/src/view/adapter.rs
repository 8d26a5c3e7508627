//! Presentation adapters.
//!
//! An adapter is the only place that knows how an item looks. The collection
//! view asks it to render a cell whenever an item is inserted or reloaded.

use std::fmt;

use crate::model::Tagged;
use crate::palette::Color;

use super::cell::CellHandle;

/// Configures a cell to display an item.
///
/// Closures with the matching signature are adapters:
///
/// ```
/// use horizon_reflow::view::{CellHandle, PresentationAdapter};
///
/// let adapter = |item: &u32, cell: &mut CellHandle| cell.label = item.to_string();
/// let mut cell = CellHandle::default();
/// adapter.render(&7, &mut cell);
/// assert_eq!(cell.label, "7");
/// ```
pub trait PresentationAdapter<T> {
    /// Writes the visual content of `item` into `cell`.
    fn render(&self, item: &T, cell: &mut CellHandle);
}

impl<T, F> PresentationAdapter<T> for F
where
    F: Fn(&T, &mut CellHandle),
{
    fn render(&self, item: &T, cell: &mut CellHandle) {
        self(item, cell)
    }
}

/// Fills the cell with the swatch color and labels it with the color name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwatchAdapter;

impl PresentationAdapter<Color> for SwatchAdapter {
    fn render(&self, item: &Color, cell: &mut CellHandle) {
        cell.background = Some(*item);
        cell.label = item.to_string();
    }
}

impl PresentationAdapter<Tagged<Color>> for SwatchAdapter {
    fn render(&self, item: &Tagged<Color>, cell: &mut CellHandle) {
        self.render(item.value(), cell);
    }
}

/// Labels the cell with the item's `Debug` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLabelAdapter;

impl<T: fmt::Debug> PresentationAdapter<T> for DebugLabelAdapter {
    fn render(&self, item: &T, cell: &mut CellHandle) {
        cell.label = format!("{item:?}");
    }
}
