//! Order primitives: single-element moves and permutation checks.

use std::collections::HashSet;

use crate::Keyed;

/// Find the current position of the element with `key`.
pub fn position_of<T: Keyed>(items: &[T], key: &T::Key) -> Option<usize> {
    items.iter().position(|item| item.key() == key)
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// Every element between the two positions shifts by exactly one slot. Returns
/// `None` when either index is out of range.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }
    let mut next = items.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    Some(next)
}

/// True when `candidate` holds exactly the keys of `current`: same length,
/// same key set, no duplicates.
pub fn is_permutation<T: Keyed>(current: &[T], candidate: &[T]) -> bool {
    if current.len() != candidate.len() {
        return false;
    }
    let expected: HashSet<&T::Key> = current.iter().map(Keyed::key).collect();
    let mut seen: HashSet<&T::Key> = HashSet::with_capacity(candidate.len());
    candidate
        .iter()
        .all(|item| expected.contains(item.key()) && seen.insert(item.key()))
}
