//! Read-only sequence views consumed by the traversal engine.
//!
//! A [`Sequence`] hands out two iterators over the same elements:
//!
//! - a **forward** iterator in natural order, used by forward scans;
//! - a **positioned** view, double-ended and exact-size, used by reverse and
//!   tailing scans which need to know where the sequence ends.
//!
//! Slices, vectors, arrays, `VecDeque` and `BTreeMap` serve both from their
//! native iterators. Hash-based maps and `serde_json::Map` cannot be walked
//! backwards, so their positioned view first copies the entry references
//! into a `Vec` (O(n) extra space).
//!
//! `Option<S>` is a sequence too: `None` behaves like an empty sequence, so
//! callers can pass possibly-absent data without guard code.

use std::collections::{btree_map, hash_map, vec_deque, BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

/// An ordered, read-only view that the traversal engine can scan.
pub trait Sequence: Sized {
    /// Element handed to filters and actions.
    type Item;

    /// Iterator in natural order.
    type Forward: Iterator<Item = Self::Item>;

    /// Iterator that can be walked from both ends and knows its length.
    type Positioned: DoubleEndedIterator<Item = Self::Item> + ExactSizeIterator;

    /// Returns the elements in natural order.
    fn forward(self) -> Self::Forward;

    /// Returns the elements as a double-ended, exact-size view.
    fn positioned(self) -> Self::Positioned;
}

impl<'a, T> Sequence for &'a [T] {
    type Item = &'a T;
    type Forward = std::slice::Iter<'a, T>;
    type Positioned = std::slice::Iter<'a, T>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.iter()
    }
}

impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Item = &'a T;
    type Forward = std::slice::Iter<'a, T>;
    type Positioned = std::slice::Iter<'a, T>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.iter()
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Forward = std::array::IntoIter<T, N>;
    type Positioned = std::array::IntoIter<T, N>;

    fn forward(self) -> Self::Forward {
        self.into_iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.into_iter()
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Item = &'a T;
    type Forward = std::slice::Iter<'a, T>;
    type Positioned = std::slice::Iter<'a, T>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.iter()
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;
    type Forward = std::vec::IntoIter<T>;
    type Positioned = std::vec::IntoIter<T>;

    fn forward(self) -> Self::Forward {
        self.into_iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.into_iter()
    }
}

impl<'a, T> Sequence for &'a VecDeque<T> {
    type Item = &'a T;
    type Forward = vec_deque::Iter<'a, T>;
    type Positioned = vec_deque::Iter<'a, T>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.iter()
    }
}

impl<'a, K, V> Sequence for &'a BTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type Forward = btree_map::Iter<'a, K, V>;
    type Positioned = btree_map::Iter<'a, K, V>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        self.iter()
    }
}

impl<'a, K, V, S: BuildHasher> Sequence for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type Forward = hash_map::Iter<'a, K, V>;
    type Positioned = std::vec::IntoIter<(&'a K, &'a V)>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        buffer_entries(self.iter())
    }
}

impl<'a> Sequence for &'a serde_json::Map<String, serde_json::Value> {
    type Item = (&'a String, &'a serde_json::Value);
    type Forward = serde_json::map::Iter<'a>;
    type Positioned = std::vec::IntoIter<(&'a String, &'a serde_json::Value)>;

    fn forward(self) -> Self::Forward {
        self.iter()
    }

    fn positioned(self) -> Self::Positioned {
        buffer_entries(self.iter())
    }
}

impl<S: Sequence> Sequence for Option<S> {
    type Item = S::Item;
    type Forward = Guarded<S::Forward>;
    type Positioned = Guarded<S::Positioned>;

    fn forward(self) -> Self::Forward {
        Guarded(self.map(Sequence::forward))
    }

    fn positioned(self) -> Self::Positioned {
        Guarded(self.map(Sequence::positioned))
    }
}

/// Materializes map entries so they can be addressed by position.
fn buffer_entries<I: Iterator>(entries: I) -> std::vec::IntoIter<I::Item> {
    let buffered: Vec<I::Item> = entries.collect();
    buffered.into_iter()
}

/// Iterator over a sequence that may be absent. An absent sequence is empty.
#[derive(Debug, Clone)]
pub struct Guarded<I>(Option<I>);

impl<I: Iterator> Iterator for Guarded<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            Some(inner) => inner.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<I: DoubleEndedIterator> DoubleEndedIterator for Guarded<I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next_back()
    }
}

impl<I: ExactSizeIterator> ExactSizeIterator for Guarded<I> {}
