//! Flat-record tree assembly.
//!
//! A flat collection of records, each carrying its own id and the id of its
//! parent, is rebuilt into a forest. Records with a blank parent id become
//! roots; every other record is attached to the record whose id matches its
//! parent id. Sibling groups keep discovery order unless an ordering is
//! given.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trellis::sort_children_tree;
//!
//! let records = vec![
//!     json!({ "id": 1, "pid": null, "name": "root" }),
//!     json!({ "id": 2, "pid": 1, "name": "left" }),
//!     json!({ "id": 3, "pid": 1, "name": "right" }),
//! ];
//!
//! let forest = sort_children_tree(&records, "id", "pid", "children").unwrap();
//! assert_eq!(forest.len(), 1);
//! assert_eq!(forest[0]["children"][1]["name"], "right");
//! ```
//!
//! # Rules
//!
//! - Empty input or a blank field name builds nothing (`None`), which is
//!   distinct from a forest with no trees.
//! - When two records share an id, the later one is the parent that children
//!   attach to.
//! - A record whose parent id matches no record is left out of the forest,
//!   unless [`OrphanPolicy::Promote`] is set, in which case it becomes a root.
//! - Records whose parent chain loops back on itself are never reachable
//!   from a root and are left out.
//! - Each record that owns its id is emitted without its original children
//!   field; the field is then set to the assembled children, if any.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, trace};

use crate::config::{OrphanPolicy, TreeFields, TreeOptions};
use crate::error::{Result, TreeError};
use crate::ordering::OrderBy;
use crate::record::{RecordKey, TreeRecord};
use crate::walk::for_each_indexing;

/// Configurable tree assembler.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use trellis::{OrphanPolicy, TreeBuilder};
///
/// let records = vec![
///     json!({ "key": "a", "sort": 2 }),
///     json!({ "key": "b", "parent": "a", "sort": 9 }),
///     json!({ "key": "c", "parent": "a", "sort": 4 }),
///     json!({ "key": "d", "parent": "zz" }),
/// ];
///
/// let forest = TreeBuilder::new("key", "parent", "nodes")
///     .orphans(OrphanPolicy::Promote)
///     .order_desc("sort")
///     .build(&records)
///     .unwrap();
///
/// assert_eq!(forest.len(), 2);
/// assert_eq!(forest[0]["nodes"][0]["key"], "b");
/// assert_eq!(forest[1]["key"], "d");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: TreeOptions,
}

impl TreeBuilder {
    /// Creates a builder for the given field names.
    pub fn new(
        id_field: impl Into<String>,
        parent_id_field: impl Into<String>,
        children_field: impl Into<String>,
    ) -> Self {
        TreeBuilder::with_options(
            TreeOptions::new().fields(TreeFields::new(id_field, parent_id_field, children_field)),
        )
    }

    /// Creates a builder from complete options.
    pub fn with_options(options: TreeOptions) -> Self {
        TreeBuilder { options }
    }

    /// Sets the orphan policy.
    pub fn orphans(mut self, policy: OrphanPolicy) -> Self {
        self.options.orphans = policy;
        self
    }

    /// Orders every sibling group by a field.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.options.order = Some(order);
        self
    }

    /// Orders every sibling group by a field, ascending.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(OrderBy::asc(field))
    }

    /// Orders every sibling group by a field, descending.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(OrderBy::desc(field))
    }

    /// Returns the options this builder runs with.
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    // ========================================================================
    // Lenient builds
    // ========================================================================

    /// Assembles the forest, or returns `None` if nothing could be built.
    pub fn build<R: TreeRecord>(&self, records: &[R]) -> Option<Vec<R>> {
        self.try_build(records).ok()
    }

    /// Assembles the forest, sorting every sibling group with `compare`.
    ///
    /// `compare` takes precedence over a configured field ordering.
    pub fn build_by<R, C>(&self, records: &[R], compare: C) -> Option<Vec<R>>
    where
        R: TreeRecord,
        C: FnMut(&R, &R) -> Ordering,
    {
        self.try_build_by(records, compare).ok()
    }

    // ========================================================================
    // Strict builds
    // ========================================================================

    /// Assembles the forest, reporting why nothing was built.
    pub fn try_build<R: TreeRecord>(&self, records: &[R]) -> Result<Vec<R>> {
        match &self.options.order {
            Some(order) => self.assemble(records, Some(|a: &R, b: &R| order.compare_records(a, b))),
            None => self.assemble(records, None::<fn(&R, &R) -> Ordering>),
        }
    }

    /// Strict form of [`build_by`](TreeBuilder::build_by).
    pub fn try_build_by<R, C>(&self, records: &[R], compare: C) -> Result<Vec<R>>
    where
        R: TreeRecord,
        C: FnMut(&R, &R) -> Ordering,
    {
        self.assemble(records, Some(compare))
    }

    fn assemble<R, C>(&self, records: &[R], mut compare: Option<C>) -> Result<Vec<R>>
    where
        R: TreeRecord,
        C: FnMut(&R, &R) -> Ordering,
    {
        if records.is_empty() {
            debug!("tree assembly skipped: no records");
            return Err(TreeError::EmptyInput);
        }
        let fields = &self.options.fields;
        if let Err(err) = fields.validate() {
            debug!("tree assembly skipped: {err}");
            return Err(err);
        }

        let owners = register(records, &fields.id);
        if owners.is_empty() {
            debug!("tree assembly skipped: no record has a {:?} value", fields.id);
            return Err(TreeError::NoKeyedRecords);
        }

        let links = link(records, &owners, &fields.parent_id, self.options.orphans);

        // Parents before children; walked backwards so every group is
        // complete before its parent is emitted.
        let mut order = Vec::with_capacity(records.len());
        let mut pending: Vec<usize> = links.roots.iter().rev().copied().collect();
        while let Some(index) = pending.pop() {
            order.push(index);
            if let Some(group) = links.children.get(&index) {
                pending.extend(group.iter().rev().copied());
            }
        }

        let unreachable = records.len() - order.len() - links.dropped;
        if unreachable > 0 {
            debug!("{unreachable} records unreachable from any root");
        }

        let mut built: Vec<Option<R>> = (0..records.len()).map(|_| None).collect();
        for &index in order.iter().rev() {
            let record = &records[index];
            let owns_id = record
                .field_key(&fields.id)
                .is_some_and(|key| owners.get(&key) == Some(&index));

            let mut node = if owns_id {
                record.without_field(&fields.children)
            } else {
                record.clone()
            };

            if let Some(group) = links.children.get(&index) {
                let mut siblings: Vec<R> = group.iter().filter_map(|&child| built[child].take()).collect();
                if let Some(compare) = compare.as_mut() {
                    siblings.sort_by(|a, b| compare(a, b));
                }
                node.set_children(&fields.children, siblings);
            }
            built[index] = Some(node);
        }

        let forest: Vec<R> = links
            .roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect();

        trace!(
            "assembled {} roots from {} records ({} ids)",
            forest.len(),
            records.len(),
            owners.len()
        );

        if forest.is_empty() {
            Err(TreeError::EmptyForest)
        } else {
            Ok(forest)
        }
    }
}

/// Maps every non-blank id to the position of the last record carrying it.
fn register<R: TreeRecord>(records: &[R], id_field: &str) -> HashMap<RecordKey, usize> {
    let mut owners: HashMap<RecordKey, usize> = HashMap::new();

    for_each_indexing(records, |index, record| {
        let Some(key) = record.field_key(id_field) else {
            return;
        };
        match owners.entry(key) {
            Entry::Occupied(mut entry) => {
                debug!(
                    "duplicate id {} at record {index} replaces record {}",
                    entry.key(),
                    entry.get()
                );
                entry.insert(index);
            }
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    });

    owners
}

/// Parent/child edges discovered in the second pass.
struct Links {
    roots: Vec<usize>,
    children: HashMap<usize, Vec<usize>>,
    dropped: usize,
}

fn link<R: TreeRecord>(
    records: &[R],
    owners: &HashMap<RecordKey, usize>,
    parent_id_field: &str,
    orphans: OrphanPolicy,
) -> Links {
    let mut links = Links {
        roots: Vec::new(),
        children: HashMap::new(),
        dropped: 0,
    };

    for_each_indexing(records, |index, record| {
        let Some(parent_key) = record.field_key(parent_id_field) else {
            links.roots.push(index);
            return;
        };
        match (owners.get(&parent_key), orphans) {
            (Some(&parent), _) => links.children.entry(parent).or_default().push(index),
            (None, OrphanPolicy::Promote) => {
                debug!("record {index} promoted to root: parent {parent_key} not found");
                links.roots.push(index);
            }
            (None, OrphanPolicy::Drop) => {
                debug!("record {index} dropped: parent {parent_key} not found");
                links.dropped += 1;
            }
        }
    });

    links
}

// ============================================================================
// Free-function entry points
// ============================================================================

/// Rebuilds a forest from flat records, keeping discovery order.
///
/// Returns `None` if `records` is empty, a field name is blank, no record has
/// an id, or no root remains.
pub fn sort_children_tree<R: TreeRecord>(
    records: &[R],
    id_field: &str,
    parent_id_field: &str,
    children_field: &str,
) -> Option<Vec<R>> {
    TreeBuilder::new(id_field, parent_id_field, children_field).build(records)
}

/// Rebuilds a forest, sorting every sibling group with `compare`.
pub fn sort_children_tree_by<R, C>(
    records: &[R],
    id_field: &str,
    parent_id_field: &str,
    children_field: &str,
    compare: C,
) -> Option<Vec<R>>
where
    R: TreeRecord,
    C: FnMut(&R, &R) -> Ordering,
{
    TreeBuilder::new(id_field, parent_id_field, children_field).build_by(records, compare)
}

/// Rebuilds a forest, ordering every sibling group by a field.
pub fn sort_children_tree_by_field<R: TreeRecord>(
    records: &[R],
    id_field: &str,
    parent_id_field: &str,
    children_field: &str,
    order: OrderBy,
) -> Option<Vec<R>> {
    TreeBuilder::new(id_field, parent_id_field, children_field)
        .order_by(order)
        .build(records)
}
