//! Reordering for ordered collections of uniquely keyed elements
//!
//! `quotecraft-reorder` turns reorder intents into new total orders. It never
//! loses, duplicates, or mutates an element: every operation returns a fresh
//! `Vec` that is a permutation of its input.
//!
//! Two protocols are provided:
//!
//! - **Pointer drag**: a short-lived [`DragSession`] that follows the dragged
//!   element by key while a stream of drag-over events moves it live.
//! - **Keyboard**: [`reorder_by_keyboard`], a single atomic swap per key press.
//!
//! ```
//! use quotecraft_reorder::{DragSession, Direction, reorder_by_keyboard};
//!
//! let items = vec!["a", "b", "c"];
//! let mut drag = DragSession::new();
//! drag.start(&items, 0);
//! let moved = drag.over(&items, 2).unwrap();
//! assert_eq!(moved, vec!["b", "c", "a"]);
//! drag.end();
//!
//! let swapped = reorder_by_keyboard(&moved, 1, Direction::Up).unwrap();
//! assert_eq!(swapped, vec!["c", "b", "a"]);
//! ```

mod drag;
mod keyboard;
mod keyed;
mod permutation;

pub use drag::{reorder_by_drag, DragEvent, DragSession, DragState};
pub use keyboard::{reorder_by_keyboard, Direction};
pub use keyed::Keyed;
pub use permutation::{is_permutation, move_item, position_of};
