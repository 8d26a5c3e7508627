//! Item positions within a collection.
//!
//! An [`ItemPosition`] addresses one slot of a visual collection by section
//! and item index. Collections driven by this crate have a single section, so
//! [`ItemPosition::new`] is what most code uses.

use std::fmt;

/// The only section a single-section collection exposes.
pub const DEFAULT_SECTION: usize = 0;

/// Represents a slot in a visual collection.
///
/// Positions are plain coordinates: they say nothing about which item lives
/// there. After a batch update, positions obtained before the update refer
/// to the old layout.
///
/// Ordering is by section, then by item index.
///
/// # Example
///
/// ```
/// use horizon_reflow::model::ItemPosition;
///
/// let pos = ItemPosition::new(3);
/// assert_eq!(pos.section(), 0);
/// assert_eq!(pos.item(), 3);
/// assert_eq!(pos.to_string(), "[0, 3]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemPosition {
    section: usize,
    item: usize,
}

impl ItemPosition {
    /// Creates a position in the default section.
    #[inline]
    pub const fn new(item: usize) -> Self {
        Self {
            section: DEFAULT_SECTION,
            item,
        }
    }

    /// Creates a position in an explicit section.
    #[inline]
    pub const fn at(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns the section of this position.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Returns a position in the same section at a different index.
    #[inline]
    pub const fn sibling(&self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }

    /// Returns positions `range.start..range.end` in the default section.
    pub fn range(range: std::ops::Range<usize>) -> impl Iterator<Item = ItemPosition> {
        range.map(ItemPosition::new)
    }
}

impl fmt::Display for ItemPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<usize> for ItemPosition {
    fn from(item: usize) -> Self {
        Self::new(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section() {
        let pos = ItemPosition::new(5);
        assert_eq!(pos.section(), DEFAULT_SECTION);
        assert_eq!(pos.item(), 5);
        assert_eq!(ItemPosition::from(5), pos);
    }

    #[test]
    fn test_sibling_keeps_section() {
        let pos = ItemPosition::at(2, 1);
        let sibling = pos.sibling(4);
        assert_eq!(sibling.section(), 2);
        assert_eq!(sibling.item(), 4);
    }

    #[test]
    fn test_ordering() {
        assert!(ItemPosition::new(0) < ItemPosition::new(1));
        assert!(ItemPosition::at(0, 9) < ItemPosition::at(1, 0));
    }

    #[test]
    fn test_range() {
        let positions: Vec<_> = ItemPosition::range(1..4).collect();
        assert_eq!(
            positions,
            vec![
                ItemPosition::new(1),
                ItemPosition::new(2),
                ItemPosition::new(3)
            ]
        );
        assert_eq!(ItemPosition::range(2..2).count(), 0);
    }
}
