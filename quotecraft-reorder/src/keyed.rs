//! The identity seam shared by every reorderable element.

use std::fmt::Debug;
use std::hash::Hash;

/// An element with a stable identity that survives being moved.
///
/// Reordering tracks elements by key, never by slot, so the key must be
/// unique within a collection and must not change while the element moves.
pub trait Keyed {
    type Key: Clone + Eq + Hash + Debug;

    fn key(&self) -> &Self::Key;
}

impl Keyed for String {
    type Key = String;

    fn key(&self) -> &String {
        self
    }
}

impl<'a> Keyed for &'a str {
    type Key = &'a str;

    fn key(&self) -> &&'a str {
        self
    }
}
