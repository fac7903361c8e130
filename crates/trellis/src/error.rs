//! Error types for the trellis crate.

use thiserror::Error;

/// Which of the three tree fields a [`TreeError::BlankField`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// The record's own id.
    Id,
    /// The reference to the parent's id.
    ParentId,
    /// The slot that receives the children.
    Children,
}

impl FieldRole {
    /// Returns the display name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::Id => "id",
            FieldRole::ParentId => "parent id",
            FieldRole::Children => "children",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons a strict tree build produced nothing.
///
/// The lenient entry points ([`sort_children_tree`](crate::sort_children_tree)
/// and friends) collapse all of these into `None`.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The input collection was empty.
    #[error("no records to assemble")]
    EmptyInput,

    /// One of the field names was empty or whitespace.
    #[error("{role} field name is blank")]
    BlankField { role: FieldRole },

    /// No record carried a non-blank id.
    #[error("no record has a non-blank id")]
    NoKeyedRecords,

    /// Assembly finished without a single root.
    #[error("no root records after assembly")]
    EmptyForest,

    /// Tree options could not be parsed.
    #[error("invalid tree options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
