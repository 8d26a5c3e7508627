//! Item sources.
//!
//! An [`ItemSource`] produces the sequences a collection is updated with:
//! an initial arrangement, shuffles, and small edits of the current one.
//! [`ColorService`] is the swatch palette used by the demo;
//! [`TaggedSource`] wraps any source so its values carry stable identities.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use horizon_reflow_core::logging::targets;

use crate::error::SourceError;
use crate::model::{Item, Tagged, retag};
use crate::palette::Color;

/// Produces ordered sequences of items.
pub trait ItemSource {
    /// The item type produced.
    type Item: Item;

    /// The starting sequence.
    fn initial(&self) -> Vec<Self::Item>;

    /// The current items in a new random order.
    fn shuffled(&mut self, current: &[Self::Item]) -> Vec<Self::Item>;

    /// The current items with the first replaced and one appended.
    ///
    /// Both new items are ones not currently shown. On an empty sequence
    /// there is nothing to replace and only the appended item is produced.
    fn with_one_replaced_and_one_added(
        &mut self,
        current: &[Self::Item],
    ) -> Result<Vec<Self::Item>, SourceError>;

    /// The current items with one random item removed.
    fn with_one_removed(&mut self, current: &[Self::Item]) -> Vec<Self::Item>;
}

/// Every color the swatch demo can show.
pub const AVAILABLE_COLORS: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::PURPLE,
    Color::BROWN,
];

/// The swatch demo's starting arrangement.
pub const INITIAL_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// Color sequences drawn from a fixed palette.
///
/// # Example
///
/// ```
/// use horizon_reflow::source::{ColorService, ItemSource};
///
/// let mut service = ColorService::with_seed(7);
/// let initial = service.initial();
/// let next = service.with_one_replaced_and_one_added(&initial).unwrap();
///
/// assert_eq!(next.len(), initial.len() + 1);
/// assert_eq!(&next[1..3], &initial[1..]);
/// ```
#[derive(Debug, Clone)]
pub struct ColorService {
    rng: StdRng,
    palette: Vec<Color>,
    initial: Vec<Color>,
}

impl ColorService {
    /// Creates a service over the default palette, seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a service with a deterministic random sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            palette: AVAILABLE_COLORS.to_vec(),
            initial: INITIAL_COLORS.to_vec(),
        }
    }

    /// Replaces the palette and the initial arrangement.
    pub fn with_palette(mut self, palette: Vec<Color>, initial: Vec<Color>) -> Self {
        self.palette = palette;
        self.initial = initial;
        self
    }

    /// The colors this service picks new items from.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// A fixed rearrangement that inserts, removes and moves at once
    /// relative to the initial colors.
    pub fn showcase() -> Vec<Color> {
        vec![
            Color::ORANGE,
            Color::GREEN,
            Color::RED,
            Color::BLUE,
            Color::YELLOW,
        ]
    }
}

impl Default for ColorService {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSource for ColorService {
    type Item = Color;

    fn initial(&self) -> Vec<Color> {
        self.initial.clone()
    }

    fn shuffled(&mut self, current: &[Color]) -> Vec<Color> {
        let mut colors = current.to_vec();
        colors.shuffle(&mut self.rng);
        colors
    }

    fn with_one_replaced_and_one_added(
        &mut self,
        current: &[Color],
    ) -> Result<Vec<Color>, SourceError> {
        let mut addable: Vec<Color> = self
            .palette
            .iter()
            .filter(|color| !current.contains(color))
            .copied()
            .collect();
        addable.shuffle(&mut self.rng);

        let needed = if current.is_empty() { 1 } else { 2 };
        let exhausted = SourceError::PaletteExhausted {
            needed,
            available: addable.len(),
        };
        if addable.len() < needed {
            tracing::warn!(target: targets::SOURCE, %exhausted, "cannot replace and add");
            return Err(exhausted);
        }

        let mut fresh = addable.into_iter();
        let mut colors = Vec::with_capacity(current.len() + 1);
        if let Some((_, rest)) = current.split_first() {
            colors.push(fresh.next().ok_or_else(|| exhausted.clone())?);
            colors.extend_from_slice(rest);
        }
        colors.push(fresh.next().ok_or(exhausted)?);
        Ok(colors)
    }

    fn with_one_removed(&mut self, current: &[Color]) -> Vec<Color> {
        let mut colors = current.to_vec();
        if !colors.is_empty() {
            let index = self.rng.gen_range(0..colors.len());
            colors.remove(index);
        }
        colors
    }
}

/// Wraps a source so every produced value carries an [`ItemId`](crate::model::ItemId).
///
/// Identities are carried over with [`retag`], so shuffling a sequence with
/// repeated values still diffs as pure moves.
#[derive(Debug, Clone)]
pub struct TaggedSource<S> {
    inner: S,
}

impl<S: ItemSource> TaggedSource<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn values(current: &[Tagged<S::Item>]) -> Vec<S::Item> {
        current.iter().map(|tagged| tagged.value().clone()).collect()
    }
}

impl<S: ItemSource> ItemSource for TaggedSource<S> {
    type Item = Tagged<S::Item>;

    fn initial(&self) -> Vec<Self::Item> {
        Tagged::tag_all(self.inner.initial())
    }

    fn shuffled(&mut self, current: &[Self::Item]) -> Vec<Self::Item> {
        let values = self.inner.shuffled(&Self::values(current));
        retag(current, values)
    }

    fn with_one_replaced_and_one_added(
        &mut self,
        current: &[Self::Item],
    ) -> Result<Vec<Self::Item>, SourceError> {
        let values = self
            .inner
            .with_one_replaced_and_one_added(&Self::values(current))?;
        Ok(retag(current, values))
    }

    fn with_one_removed(&mut self, current: &[Self::Item]) -> Vec<Self::Item> {
        let values = self.inner.with_one_removed(&Self::values(current));
        retag(current, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_initial_colors() {
        let service = ColorService::with_seed(1);
        assert_eq!(service.initial(), INITIAL_COLORS.to_vec());
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut service = ColorService::with_seed(42);
        let current = AVAILABLE_COLORS.to_vec();
        let shuffled = service.shuffled(&current);

        let mut a = current.iter().map(|c| c.to_hex()).collect::<Vec<_>>();
        let mut b = shuffled.iter().map(|c| c.to_hex()).collect::<Vec<_>>();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_replace_and_add_uses_unseen_colors() {
        let mut service = ColorService::with_seed(3);
        let current = service.initial();
        let next = service.with_one_replaced_and_one_added(&current).unwrap();

        assert_eq!(next.len(), 4);
        assert_eq!(&next[1..3], &current[1..]);
        assert!(!current.contains(&next[0]));
        assert!(!current.contains(&next[3]));
        assert_ne!(next[0], next[3]);
    }

    #[test]
    fn test_replace_and_add_works_on_longer_sequences() {
        let mut service = ColorService::with_seed(9);
        let current = vec![Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];
        let next = service.with_one_replaced_and_one_added(&current).unwrap();
        assert_eq!(next.len(), 5);
        assert_eq!(&next[1..4], &current[1..]);
    }

    #[test]
    fn test_replace_and_add_on_empty_appends_one() {
        let mut service = ColorService::with_seed(5);
        let next = service.with_one_replaced_and_one_added(&[]).unwrap();
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_palette_exhausted() {
        let mut service = ColorService::with_seed(5);
        let current = vec![
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::YELLOW,
            Color::PURPLE,
        ];
        assert_eq!(
            service.with_one_replaced_and_one_added(&current),
            Err(SourceError::PaletteExhausted {
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_remove_one() {
        let mut service = ColorService::with_seed(11);
        let current = service.initial();
        let next = service.with_one_removed(&current);
        assert_eq!(next.len(), 2);
        assert!(next.iter().all(|c| current.contains(c)));

        assert!(service.with_one_removed(&[]).is_empty());
    }

    #[test]
    fn test_tagged_source_keeps_ids_on_shuffle() {
        let mut source = TaggedSource::new(ColorService::with_seed(8));
        let current = source.initial();
        let shuffled = source.shuffled(&current);

        let before: HashSet<_> = current.iter().map(|t| t.id()).collect();
        let after: HashSet<_> = shuffled.iter().map(|t| t.id()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_tagged_source_mints_ids_for_new_colors() {
        let mut source = TaggedSource::new(ColorService::with_seed(8));
        let current = source.initial();
        let next = source.with_one_replaced_and_one_added(&current).unwrap();

        assert_eq!(next[1].id(), current[1].id());
        assert_eq!(next[2].id(), current[2].id());
        assert!(current.iter().all(|t| t.id() != next[0].id()));
    }
}
