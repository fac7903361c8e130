//! Trellis - Filtered traversal combinators and flat-record tree assembly.
//!
//! Trellis provides two independent tools for in-memory collections:
//!
//! - **Walks**: forward or reverse scans over slices, vectors, deques and
//!   maps, with an optional filter, optional structural indexes, an optional
//!   stop signal from the action, and "tailing" scans that withhold the
//!   boundary element and return it.
//! - **Tree assembly**: rebuilds a forest from flat records that reference
//!   their parent by id, with optional per-level ordering.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use trellis::{for_each_tailing, sort_children_tree, Walk};
//!
//! // Join with separators: act on all but the last element.
//! let words = ["a", "b", "c"];
//! let mut joined = String::new();
//! let last = for_each_tailing(&words, |w| {
//!     joined.push_str(w);
//!     joined.push_str(", ");
//! });
//! joined.push_str(last.unwrap());
//! assert_eq!(joined, "a, b, c");
//!
//! // Filtered reverse scan with structural indexes.
//! let mut odd = Vec::new();
//! Walk::over(&[1, 2, 3, 4, 5])
//!     .reverse()
//!     .filter(|n| **n % 2 == 1)
//!     .for_each_indexing(|index, n| odd.push((index, *n)));
//! assert_eq!(odd, vec![(4, 5), (2, 3), (0, 1)]);
//!
//! // Flat rows into a tree.
//! let rows = vec![
//!     json!({ "id": 1, "pid": null }),
//!     json!({ "id": 2, "pid": 1 }),
//!     json!({ "id": 3, "pid": 1 }),
//! ];
//! let forest = sort_children_tree(&rows, "id", "pid", "children").unwrap();
//! assert_eq!(forest[0]["children"].as_array().map(Vec::len), Some(2));
//! ```
//!
//! # Walk Variants
//!
//! | Free function | Builder form |
//! |---------------|--------------|
//! | `for_each` | `Walk::over(s).for_each(a)` |
//! | `for_each_breakable` | `Walk::over(s).for_each_breakable(a)` |
//! | `for_each_indexing` | `Walk::over(s).for_each_indexing(a)` |
//! | `for_each_indexing_breakable` | `Walk::over(s).for_each_indexing_breakable(a)` |
//! | `reverse_for_each…` | `Walk::over(s).reverse()…` |
//! | `for_each_tailing` | `Walk::over(s).tailing(a)` |
//! | `for_each_indexing_tailing` | `Walk::over(s).tailing_indexing(a)` |
//! | `reverse_for_each_heading` | `Walk::over(s).reverse().tailing(a)` |
//! | `reverse_for_each_indexing_heading` | `Walk::over(s).reverse().tailing_indexing(a)` |
//!
//! Filters are only available on the builder: `Walk::over(s).filter(f)`.
//!
//! # Absent Data
//!
//! Nothing here panics or errors on missing input. `None` and empty
//! sequences make every walk a no-op, and the tree entry points return
//! `None` when there is nothing to build. [`TreeBuilder::try_build`] reports
//! which guard fired.

mod config;
mod error;
mod flow;
mod ordering;
mod record;
mod sequence;
mod tree;
mod value;
mod walk;

// Re-export public API
pub use config::{OrphanPolicy, TreeFields, TreeOptions};
pub use error::{FieldRole, Result, TreeError};
pub use flow::{Direction, Flow, Walked};
pub use ordering::{compare_values, Dir, OrderBy};
pub use record::{RecordKey, TreeRecord};
pub use sequence::{Guarded, Sequence};
pub use tree::{sort_children_tree, sort_children_tree_by, sort_children_tree_by_field, TreeBuilder};
pub use value::{Number, Value};
pub use walk::{
    for_each, for_each_breakable, for_each_indexing, for_each_indexing_breakable,
    for_each_indexing_tailing, for_each_tailing, reverse_for_each, reverse_for_each_breakable,
    reverse_for_each_heading, reverse_for_each_indexing, reverse_for_each_indexing_breakable,
    reverse_for_each_indexing_heading, AcceptAll, Filter, Walk,
};
