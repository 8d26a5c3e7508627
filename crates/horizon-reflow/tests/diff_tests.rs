//! Tests for the diff strategies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use horizon_reflow::batch::replay;
use horizon_reflow::diff::{DiffStrategy, OperationKind, diff_by_count, diff_by_identity};
use horizon_reflow::model::{ItemPosition, Tagged, retag};

fn positions(items: &[usize]) -> Vec<ItemPosition> {
    items.iter().copied().map(ItemPosition::new).collect()
}

fn moves(pairs: &[(usize, usize)]) -> Vec<(ItemPosition, ItemPosition)> {
    pairs
        .iter()
        .map(|&(from, to)| (ItemPosition::new(from), ItemPosition::new(to)))
        .collect()
}

/// Distinct values drawn from `0..universe` in random order.
fn distinct_sequence(rng: &mut StdRng, universe: u32) -> Vec<u32> {
    let mut values: Vec<u32> = (0..universe).collect();
    values.shuffle(rng);
    let len = rng.gen_range(0..=universe as usize);
    values.truncate(len);
    values
}

/// Values from a small range, so repeats are common.
fn repeating_sequence(rng: &mut StdRng) -> Vec<u32> {
    let len = rng.gen_range(0..10);
    (0..len).map(|_| rng.gen_range(0..4)).collect()
}

#[test]
fn test_count_grow() {
    let ops = diff_by_count(&["red", "green", "blue"], &["red", "green", "blue", "yellow"]);
    assert_eq!(ops.insertions(), positions(&[3]).as_slice());
    assert_eq!(ops.reloads(), positions(&[0, 1, 2]).as_slice());
    assert!(ops.removals().is_empty());
    assert!(ops.moves().is_empty());
}

#[test]
fn test_count_shrink() {
    let ops = diff_by_count(&["red", "green", "blue"], &["green", "blue"]);
    assert_eq!(ops.removals(), positions(&[2]).as_slice());
    assert_eq!(ops.reloads(), positions(&[0, 1]).as_slice());
    assert!(ops.insertions().is_empty());
}

#[test]
fn test_identity_rotation() {
    let ops = diff_by_identity(&["red", "green", "blue"], &["blue", "red", "green"]);
    assert_eq!(ops.moves(), moves(&[(0, 1), (1, 2), (2, 0)]).as_slice());
    assert!(ops.insertions().is_empty());
    assert!(ops.removals().is_empty());
}

#[test]
fn test_identity_replacements() {
    let ops = diff_by_identity(&["red", "green", "blue"], &["yellow", "green", "purple"]);
    assert_eq!(ops.removals(), positions(&[0, 2]).as_slice());
    assert_eq!(ops.insertions(), positions(&[0, 2]).as_slice());
    assert_eq!(ops.moves(), moves(&[(1, 1)]).as_slice());
    assert_eq!(ops.stationary_move_count(), 1);
}

#[test]
fn test_same_sequence() {
    let sequence = ["red", "green", "blue", "yellow"];

    let ops = diff_by_count(&sequence, &sequence);
    assert_eq!(ops.reloads(), positions(&[0, 1, 2, 3]).as_slice());
    assert_eq!(ops.len(), 4);

    let ops = diff_by_identity(&sequence, &sequence);
    assert_eq!(ops.moves().len(), 4);
    assert_eq!(ops.stationary_move_count(), 4);
    assert!(ops.iter().all(|op| op.kind() == OperationKind::Move));
}

#[test]
fn test_empty_inputs() {
    let empty: [&str; 0] = [];
    for strategy in [DiffStrategy::Count, DiffStrategy::Identity] {
        assert!(strategy.diff(&empty, &empty).is_empty());

        let ops = strategy.diff(&empty, &["red", "green"]);
        assert_eq!(ops.insertions().len(), 2, "{strategy:?}");
        assert_eq!(ops.len(), 2, "{strategy:?}");

        let ops = strategy.diff(&["red", "green"], &empty);
        assert_eq!(ops.removals().len(), 2, "{strategy:?}");
        assert_eq!(ops.len(), 2, "{strategy:?}");
    }
}

#[test]
fn test_random_distinct_sequences_replay() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let old = distinct_sequence(&mut rng, 12);
        let new = distinct_sequence(&mut rng, 12);
        for strategy in [DiffStrategy::Count, DiffStrategy::Identity] {
            let ops = strategy.diff(&old, &new);
            assert_eq!(ops.resulting_len(old.len()), Some(new.len()));
            assert_eq!(
                replay(&old, &new, &ops).unwrap(),
                new,
                "{strategy:?}: {old:?} -> {new:?}"
            );
        }
    }
}

#[test]
fn test_random_repeating_sequences_replay() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        let old = repeating_sequence(&mut rng);
        let new = repeating_sequence(&mut rng);
        let ops = diff_by_identity(&old, &new);
        assert_eq!(replay(&old, &new, &ops).unwrap(), new, "{old:?} -> {new:?}");
    }
}

#[test]
fn test_identity_symmetry() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let old = distinct_sequence(&mut rng, 10);
        let new = distinct_sequence(&mut rng, 10);
        let forward = diff_by_identity(&old, &new);
        let backward = diff_by_identity(&new, &old);
        assert_eq!(forward.insertions(), backward.removals());
        assert_eq!(forward.removals(), backward.insertions());
        assert_eq!(forward.moves().len(), backward.moves().len());
    }
}

#[test]
fn test_tagged_duplicates_move() {
    let old = Tagged::tag_all(vec!["red", "red", "blue"]);
    let new = retag(&old, vec!["blue", "red", "red"]);
    let ops = diff_by_identity(&old, &new);

    assert!(ops.insertions().is_empty());
    assert!(ops.removals().is_empty());
    assert_eq!(ops.moves().len(), 3);
    assert_eq!(replay(&old, &new, &ops).unwrap(), new);
}
