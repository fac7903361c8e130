//! Filtered traversal over sequences.
//!
//! [`Walk`] is the traversal policy: a sequence, a direction and an optional
//! filter. Every scan runs through [`Walk::scan`]; the remaining methods and
//! the free functions at the bottom of this module are entry points that fix
//! whether the action receives indexes, whether it can stop the scan, and
//! whether the boundary element is withheld.
//!
//! # Example
//!
//! ```
//! use trellis::{Flow, Walk};
//!
//! let numbers = vec![1, 2, 3, 4, 5, 6];
//! let mut seen = Vec::new();
//!
//! Walk::over(&numbers)
//!     .reverse()
//!     .filter(|n| *n % 2 == 0)
//!     .for_each_indexing_breakable(|index, n| {
//!         seen.push((index, *n));
//!         if *n == 4 { Flow::Stop } else { Flow::Continue }
//!     });
//!
//! assert_eq!(seen, vec![(5, 6), (3, 4)]);
//! ```
//!
//! # Indexes
//!
//! The index handed to indexed actions is the element's structural position
//! in the source. A reverse scan over five elements therefore sees
//! `4, 3, 2, 1, 0`. Filtered-out elements still occupy their position.

use crate::flow::{Direction, Flow, Walked};
use crate::sequence::Sequence;

/// Decides which elements reach the action.
///
/// Implemented for every `FnMut(&T) -> bool` closure and for [`AcceptAll`].
pub trait Filter<T> {
    /// Returns `true` if `item` should be passed to the action.
    fn accepts(&mut self, item: &T) -> bool;
}

impl<T, F> Filter<T> for F
where
    F: FnMut(&T) -> bool,
{
    fn accepts(&mut self, item: &T) -> bool {
        self(item)
    }
}

/// The filter used when none is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<T> Filter<T> for AcceptAll {
    fn accepts(&mut self, _item: &T) -> bool {
        true
    }
}

/// A traversal policy bound to a sequence.
///
/// Built with [`Walk::over`], configured with [`reverse`](Walk::reverse) and
/// [`filter`](Walk::filter), and consumed by one of the scan methods.
#[derive(Debug, Clone)]
pub struct Walk<S, P = AcceptAll> {
    seq: S,
    direction: Direction,
    filter: P,
}

impl<S: Sequence> Walk<S, AcceptAll> {
    /// Creates a forward, unfiltered walk over `seq`.
    pub fn over(seq: S) -> Self {
        Walk {
            seq,
            direction: Direction::Forward,
            filter: AcceptAll,
        }
    }
}

impl<S, P> Walk<S, P>
where
    S: Sequence,
    P: Filter<S::Item>,
{
    // ========================================================================
    // Policy
    // ========================================================================

    /// Scans in reverse natural order.
    pub fn reverse(self) -> Self {
        self.direction(Direction::Reverse)
    }

    /// Sets the scan direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Only elements for which `filter` returns `true` reach the action.
    ///
    /// Replaces any previously set filter.
    pub fn filter<Q>(self, filter: Q) -> Walk<S, Q>
    where
        Q: FnMut(&S::Item) -> bool,
    {
        Walk {
            seq: self.seq,
            direction: self.direction,
            filter,
        }
    }

    /// Returns the configured direction.
    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    // ========================================================================
    // Core scan
    // ========================================================================

    /// Visits every accepted element with its structural index.
    ///
    /// The action's return value converts into [`Flow`]; the first
    /// `Flow::Stop` ends the scan right after that call. Actions returning
    /// `()` never stop.
    pub fn scan<A, R>(self, mut action: A) -> Walked
    where
        A: FnMut(usize, S::Item) -> R,
        R: Into<Flow>,
    {
        let Walk {
            seq,
            direction,
            mut filter,
        } = self;

        match direction {
            Direction::Forward => visit(seq.forward().enumerate(), &mut filter, &mut action),
            Direction::Reverse => visit(
                seq.positioned().enumerate().rev(),
                &mut filter,
                &mut action,
            ),
        }
    }

    // ========================================================================
    // Plain scans
    // ========================================================================

    /// Calls `action` for every accepted element.
    pub fn for_each<A>(self, mut action: A)
    where
        A: FnMut(S::Item),
    {
        self.scan(|_, item| action(item));
    }

    /// Calls `action` with the index of every accepted element.
    pub fn for_each_indexing<A>(self, action: A)
    where
        A: FnMut(usize, S::Item),
    {
        self.scan(action);
    }

    // ========================================================================
    // Breakable scans
    // ========================================================================

    /// Calls `action` for accepted elements until it signals stop.
    ///
    /// `false`, `None` and `Flow::Stop` all stop the scan.
    pub fn for_each_breakable<A, R>(self, mut action: A) -> Walked
    where
        A: FnMut(S::Item) -> R,
        R: Into<Flow>,
    {
        self.scan(|_, item| action(item))
    }

    /// Indexed form of [`for_each_breakable`](Walk::for_each_breakable).
    pub fn for_each_indexing_breakable<A, R>(self, action: A) -> Walked
    where
        A: FnMut(usize, S::Item) -> R,
        R: Into<Flow>,
    {
        self.scan(action)
    }

    // ========================================================================
    // Tailing scans
    // ========================================================================

    /// Calls `action` for every accepted element except the boundary one,
    /// which is returned instead.
    ///
    /// The boundary element is the structurally last element on a forward
    /// walk and the structurally first on a reverse walk. It is withheld
    /// whether or not the filter would accept it. An empty sequence calls
    /// nothing and returns `None`.
    pub fn tailing<A>(self, mut action: A) -> Option<S::Item>
    where
        A: FnMut(S::Item),
    {
        self.tailing_indexing(|_, item| action(item))
    }

    /// Indexed form of [`tailing`](Walk::tailing).
    pub fn tailing_indexing<A>(self, mut action: A) -> Option<S::Item>
    where
        A: FnMut(usize, S::Item),
    {
        let Walk {
            seq,
            direction,
            mut filter,
        } = self;

        let mut positions = seq.positioned().enumerate();
        let (_, withheld) = match direction {
            Direction::Forward => positions.next_back(),
            Direction::Reverse => positions.next(),
        }?;

        match direction {
            Direction::Forward => visit(positions, &mut filter, &mut action),
            Direction::Reverse => visit(positions.rev(), &mut filter, &mut action),
        };

        Some(withheld)
    }
}

fn visit<I, T, P, A, R>(positions: I, filter: &mut P, action: &mut A) -> Walked
where
    I: Iterator<Item = (usize, T)>,
    P: Filter<T>,
    A: FnMut(usize, T) -> R,
    R: Into<Flow>,
{
    for (index, item) in positions {
        if !filter.accepts(&item) {
            continue;
        }
        if action(index, item).into().is_stop() {
            return Walked::Stopped { index };
        }
    }
    Walked::Exhausted
}

// ============================================================================
// Free-function entry points
// ============================================================================

/// Calls `action` for every element in natural order.
pub fn for_each<S, A>(seq: S, action: A)
where
    S: Sequence,
    A: FnMut(S::Item),
{
    Walk::over(seq).for_each(action)
}

/// Calls `action` for elements in natural order until it signals stop.
pub fn for_each_breakable<S, A, R>(seq: S, action: A) -> Walked
where
    S: Sequence,
    A: FnMut(S::Item) -> R,
    R: Into<Flow>,
{
    Walk::over(seq).for_each_breakable(action)
}

/// Calls `action` with each element and its index in natural order.
pub fn for_each_indexing<S, A>(seq: S, action: A)
where
    S: Sequence,
    A: FnMut(usize, S::Item),
{
    Walk::over(seq).for_each_indexing(action)
}

/// Indexed, breakable scan in natural order.
pub fn for_each_indexing_breakable<S, A, R>(seq: S, action: A) -> Walked
where
    S: Sequence,
    A: FnMut(usize, S::Item) -> R,
    R: Into<Flow>,
{
    Walk::over(seq).for_each_indexing_breakable(action)
}

/// Calls `action` for every element, last element first.
pub fn reverse_for_each<S, A>(seq: S, action: A)
where
    S: Sequence,
    A: FnMut(S::Item),
{
    Walk::over(seq).reverse().for_each(action)
}

/// Reverse scan that stops when `action` signals stop.
pub fn reverse_for_each_breakable<S, A, R>(seq: S, action: A) -> Walked
where
    S: Sequence,
    A: FnMut(S::Item) -> R,
    R: Into<Flow>,
{
    Walk::over(seq).reverse().for_each_breakable(action)
}

/// Reverse scan with structural indexes, `len - 1` down to `0`.
pub fn reverse_for_each_indexing<S, A>(seq: S, action: A)
where
    S: Sequence,
    A: FnMut(usize, S::Item),
{
    Walk::over(seq).reverse().for_each_indexing(action)
}

/// Indexed, breakable reverse scan.
pub fn reverse_for_each_indexing_breakable<S, A, R>(seq: S, action: A) -> Walked
where
    S: Sequence,
    A: FnMut(usize, S::Item) -> R,
    R: Into<Flow>,
{
    Walk::over(seq).reverse().for_each_indexing_breakable(action)
}

/// Acts on all but the last element and returns the last one.
pub fn for_each_tailing<S, A>(seq: S, action: A) -> Option<S::Item>
where
    S: Sequence,
    A: FnMut(S::Item),
{
    Walk::over(seq).tailing(action)
}

/// Indexed form of [`for_each_tailing`].
pub fn for_each_indexing_tailing<S, A>(seq: S, action: A) -> Option<S::Item>
where
    S: Sequence,
    A: FnMut(usize, S::Item),
{
    Walk::over(seq).tailing_indexing(action)
}

/// Walks backwards over all but the first element and returns the first one.
pub fn reverse_for_each_heading<S, A>(seq: S, action: A) -> Option<S::Item>
where
    S: Sequence,
    A: FnMut(S::Item),
{
    Walk::over(seq).reverse().tailing(action)
}

/// Indexed form of [`reverse_for_each_heading`].
pub fn reverse_for_each_indexing_heading<S, A>(seq: S, action: A) -> Option<S::Item>
where
    S: Sequence,
    A: FnMut(usize, S::Item),
{
    Walk::over(seq).reverse().tailing_indexing(action)
}
