//! Keyboard reordering: one adjacent swap per key press.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Direction of a keyboard move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Swap the element at `index` with its neighbour in `direction`.
///
/// Returns `None` (nothing to emit) when the move would leave the list: `Up`
/// at index 0, `Down` at the last index, or any index out of range.
pub fn reorder_by_keyboard<T: Clone>(
    items: &[T],
    index: usize,
    direction: Direction,
) -> Option<Vec<T>> {
    if index >= items.len() {
        trace!(index, len = items.len(), "keyboard move on missing index ignored");
        return None;
    }
    let neighbour = match direction {
        Direction::Up if index == 0 => return None,
        Direction::Up => index - 1,
        Direction::Down if index + 1 == items.len() => return None,
        Direction::Down => index + 1,
    };
    let mut next = items.to_vec();
    next.swap(index, neighbour);
    Some(next)
}
