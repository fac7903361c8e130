//! Tree assembly options.
//!
//! [`TreeOptions`] can be built in code or loaded from JSON. Every key is
//! optional:
//!
//! ```json
//! {
//!   "fields": { "id": "id", "parent_id": "pid", "children": "children" },
//!   "orphans": "promote",
//!   "order": { "field": "sort", "dir": "desc" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FieldRole, Result, TreeError};
use crate::ordering::OrderBy;

/// Names of the three fields the assembler works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeFields {
    /// Field holding the record's own id.
    pub id: String,
    /// Field holding the parent's id.
    pub parent_id: String,
    /// Field that receives the list of children.
    pub children: String,
}

impl TreeFields {
    /// Creates a field set from the three names.
    pub fn new(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        children: impl Into<String>,
    ) -> Self {
        TreeFields {
            id: id.into(),
            parent_id: parent_id.into(),
            children: children.into(),
        }
    }

    /// Fails on the first field name that is empty or whitespace.
    pub fn validate(&self) -> Result<()> {
        let named = [
            (FieldRole::Id, &self.id),
            (FieldRole::ParentId, &self.parent_id),
            (FieldRole::Children, &self.children),
        ];
        match named.iter().find(|(_, name)| name.trim().is_empty()) {
            Some((role, _)) => Err(TreeError::BlankField { role: *role }),
            None => Ok(()),
        }
    }
}

impl Default for TreeFields {
    fn default() -> Self {
        TreeFields::new("id", "pid", "children")
    }
}

/// What happens to a record whose parent id matches no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave the record out of the tree.
    #[default]
    Drop,
    /// Append the record to the roots.
    Promote,
}

/// Complete configuration of a tree build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Field names.
    pub fields: TreeFields,
    /// Handling of records with an unknown parent.
    pub orphans: OrphanPolicy,
    /// Optional ordering applied to every sibling group.
    pub order: Option<OrderBy>,
}

impl TreeOptions {
    /// Creates options with default field names, dropping orphans and
    /// keeping discovery order.
    pub fn new() -> Self {
        TreeOptions::default()
    }

    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the field names.
    pub fn fields(mut self, fields: TreeFields) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the orphan policy.
    pub fn orphans(mut self, policy: OrphanPolicy) -> Self {
        self.orphans = policy;
        self
    }

    /// Orders every sibling group by a field.
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::Dir;

    #[test]
    fn defaults() {
        let options = TreeOptions::new();
        assert_eq!(options.fields, TreeFields::new("id", "pid", "children"));
        assert_eq!(options.orphans, OrphanPolicy::Drop);
        assert_eq!(options.order, None);
    }

    #[test]
    fn from_json_full() {
        let options = TreeOptions::from_json(
            r#"{
                "fields": { "id": "key", "parent_id": "parent", "children": "nodes" },
                "orphans": "promote",
                "order": { "field": "rank", "dir": "desc" }
            }"#,
        )
        .unwrap();

        assert_eq!(options.fields, TreeFields::new("key", "parent", "nodes"));
        assert_eq!(options.orphans, OrphanPolicy::Promote);
        assert_eq!(options.order, Some(OrderBy::new("rank", Dir::Desc)));
    }

    #[test]
    fn from_json_partial_fields() {
        let options = TreeOptions::from_json(r#"{ "fields": { "children": "kids" } }"#).unwrap();
        assert_eq!(options.fields, TreeFields::new("id", "pid", "kids"));
    }

    #[test]
    fn from_json_rejects_unknown_policy() {
        let err = TreeOptions::from_json(r#"{ "orphans": "adopt" }"#).unwrap_err();
        assert!(matches!(err, TreeError::InvalidOptions(_)));
    }

    #[test]
    fn validate_reports_first_blank_field() {
        assert!(TreeFields::default().validate().is_ok());

        let err = TreeFields::new("id", " ", "").validate().unwrap_err();
        assert!(matches!(
            err,
            TreeError::BlankField {
                role: FieldRole::ParentId
            }
        ));
    }
}
