//! Control-flow signals for traversals.
//!
//! [`Flow`] is what a breakable action hands back to the engine, [`Direction`]
//! selects the scan order and [`Walked`] reports how a breakable scan ended.

/// Signal returned by a breakable action.
///
/// Anything that converts into `Flow` can be returned from a breakable
/// action. The conversions keep the "only an explicit continue keeps going"
/// rule:
///
/// | Returned value | Flow |
/// |----------------|------|
/// | `()` | `Continue` |
/// | `true` | `Continue` |
/// | `false` | `Stop` |
/// | `Some(true)` | `Continue` |
/// | `Some(false)` / `None` | `Stop` |
///
/// # Example
///
/// ```
/// use trellis::Flow;
///
/// assert_eq!(Flow::from(true), Flow::Continue);
/// assert_eq!(Flow::from(None::<bool>), Flow::Stop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flow {
    /// Keep scanning.
    #[default]
    Continue,
    /// Stop after the current element.
    Stop,
}

impl Flow {
    /// Returns `true` if this is `Continue`.
    pub fn is_continue(self) -> bool {
        matches!(self, Flow::Continue)
    }

    /// Returns `true` if this is `Stop`.
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}

impl From<Option<bool>> for Flow {
    fn from(signal: Option<bool>) -> Self {
        match signal {
            Some(true) => Flow::Continue,
            Some(false) | None => Flow::Stop,
        }
    }
}

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Natural order, first element first.
    #[default]
    Forward,
    /// Reverse natural order, last element first.
    Reverse,
}

impl Direction {
    /// Returns `true` if this is `Forward`.
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }

    /// Returns `true` if this is `Reverse`.
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal state of a breakable scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Walked {
    /// Every element was offered; no action asked to stop.
    Exhausted,
    /// The action on the element at `index` asked to stop.
    Stopped {
        /// Structural position of the element that stopped the scan.
        index: usize,
    },
}

impl Walked {
    /// Returns `true` if the scan ended early.
    pub fn is_stopped(self) -> bool {
        matches!(self, Walked::Stopped { .. })
    }

    /// Returns the position that stopped the scan, if any.
    pub fn stopped_at(self) -> Option<usize> {
        match self {
            Walked::Stopped { index } => Some(index),
            Walked::Exhausted => None,
        }
    }
}
