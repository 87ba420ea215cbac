//! Property tests for drag and keyboard reordering.

use proptest::prelude::*;
use quotecraft_reorder::{is_permutation, reorder_by_keyboard, Direction, DragSession};

/// A list of `n` distinct keys plus a valid (start, target) pair.
fn list_and_pair() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
    (1usize..24).prop_flat_map(|n| {
        let items: Vec<String> = (0..n).map(|i| format!("field-{i}")).collect();
        (Just(items), 0..n, 0..n)
    })
}

proptest! {
    /// Property: a single drag yields a permutation with the dragged key at the target.
    #[test]
    fn prop_drag_lands_on_target((items, start, target) in list_and_pair()) {
        let dragged = items[start].clone();
        let mut session = DragSession::new();
        session.start(&items, start);
        let next = session.over(&items, target).unwrap_or_else(|| items.clone());

        prop_assert!(is_permutation(&items, &next));
        prop_assert_eq!(&next[target], &dragged);
    }

    /// Property: a burst of drag-overs still leaves the dragged key at the last target.
    #[test]
    fn prop_drag_burst_composes(
        (items, start, _) in list_and_pair(),
        hops in prop::collection::vec(0usize..24, 1..10),
    ) {
        let dragged = items[start].clone();
        let mut session = DragSession::new();
        session.start(&items, start);

        let mut current = items.clone();
        let mut last_target = start;
        for hop in hops {
            let target = hop % items.len();
            if let Some(next) = session.over(&current, target) {
                current = next;
            }
            last_target = target;
        }
        session.end();

        prop_assert!(is_permutation(&items, &current));
        prop_assert_eq!(&current[last_target], &dragged);
    }

    /// Property: keyboard moves swap exactly two adjacent elements or do nothing.
    #[test]
    fn prop_keyboard_swaps_adjacent((items, index, _) in list_and_pair(), up in any::<bool>()) {
        let direction = if up { Direction::Up } else { Direction::Down };
        match reorder_by_keyboard(&items, index, direction) {
            None => {
                let at_edge = (up && index == 0) || (!up && index + 1 == items.len());
                prop_assert!(at_edge);
            }
            Some(next) => {
                let other = if up { index - 1 } else { index + 1 };
                prop_assert_eq!(&next[index], &items[other]);
                prop_assert_eq!(&next[other], &items[index]);
                let untouched = (0..items.len()).filter(|&i| i != index && i != other);
                for i in untouched {
                    prop_assert_eq!(&next[i], &items[i]);
                }
            }
        }
    }
}
