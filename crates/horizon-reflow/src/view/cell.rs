//! Cells shown by a collection view.

use slotmap::new_key_type;

use crate::palette::Color;

new_key_type! {
    /// Identifies a cell owned by a collection view.
    ///
    /// The key stays valid while the cell is recycled through the reuse
    /// pool, so a cell keeps its ID across moves and reloads.
    pub struct CellId;
}

/// Position and size of a cell in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellFrame {
    /// Creates a frame.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// The visual state of one cell.
///
/// A [`PresentationAdapter`](super::PresentationAdapter) writes the content
/// fields; the collection view owns the frame and opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct CellHandle {
    /// Fill color, if any.
    pub background: Option<Color>,
    /// Text shown in the cell.
    pub label: String,
    pub(crate) frame: CellFrame,
    pub(crate) opacity: f32,
    pub(crate) reuse_count: u32,
}

impl CellHandle {
    pub(crate) fn new() -> Self {
        Self {
            background: None,
            label: String::new(),
            frame: CellFrame::default(),
            opacity: 1.0,
            reuse_count: 0,
        }
    }

    /// Current frame, including any in-flight slide.
    #[inline]
    pub fn frame(&self) -> CellFrame {
        self.frame
    }

    /// Current opacity from 0.0 (hidden) to 1.0.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// How many times this cell came back out of the reuse pool.
    #[inline]
    pub fn reuse_count(&self) -> u32 {
        self.reuse_count
    }

    /// Clears content before the cell goes back into the reuse pool.
    pub(crate) fn prepare_for_reuse(&mut self) {
        self.background = None;
        self.label.clear();
        self.opacity = 1.0;
    }
}

impl Default for CellHandle {
    fn default() -> Self {
        Self::new()
    }
}
