//! Vertical list layout.

use super::cell::CellFrame;

/// Full-width rows stacked top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListLayout {
    width: f32,
    cell_height: f32,
    spacing: f32,
}

impl ListLayout {
    /// Default row width.
    pub const DEFAULT_WIDTH: f32 = 320.0;
    /// Default row height.
    pub const DEFAULT_CELL_HEIGHT: f32 = 60.0;

    /// Creates a layout.
    pub fn new(width: f32, cell_height: f32, spacing: f32) -> Self {
        Self {
            width,
            cell_height,
            spacing,
        }
    }

    /// Row width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Row height.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Gap between consecutive rows.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Frame of the row at `index`.
    pub fn frame_for(&self, index: usize) -> CellFrame {
        let y = index as f32 * (self.cell_height + self.spacing);
        CellFrame::new(0.0, y, self.width, self.cell_height)
    }

    /// Total height of `count` rows.
    pub fn content_height(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.cell_height + (count - 1) as f32 * self.spacing
    }
}

impl Default for ListLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_CELL_HEIGHT, 0.0)
    }
}
