//! Named-field access for flat records.
//!
//! The tree assembler never looks inside a record directly; it goes through
//! [`TreeRecord`], which reads and writes fields by name. Implementations are
//! provided for `serde_json::Map<String, serde_json::Value>` and
//! `serde_json::Value`. Other record types implement the trait by hand.

use std::fmt;

use crate::value::Value;

/// Lookup key derived from an id or parent-id field.
///
/// Keys keep the JSON kind of the value they came from, so the number `1` and
/// the string `"1"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    /// Creates a key from a string id. Blank strings yield `None`.
    pub fn text(id: &str) -> Option<Self> {
        if id.trim().is_empty() {
            return None;
        }
        Some(RecordKey(serde_json::Value::from(id).to_string()))
    }

    /// Creates a key from a JSON value.
    ///
    /// Returns `None` for blank ids: `null`, or a string that is empty or
    /// whitespace only.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => RecordKey::text(s),
            other => Some(RecordKey(other.to_string())),
        }
    }

    /// Returns the canonical text of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self {
        RecordKey(id.to_string())
    }
}

impl From<u64> for RecordKey {
    fn from(id: u64) -> Self {
        RecordKey(id.to_string())
    }
}

/// A flat record whose fields can be read and written by name.
///
/// # Manual Implementation
///
/// ```
/// use trellis::{RecordKey, TreeRecord, Value};
///
/// #[derive(Clone)]
/// struct Dept {
///     id: u64,
///     parent: Option<u64>,
///     name: String,
///     children: Vec<Dept>,
/// }
///
/// impl TreeRecord for Dept {
///     fn field_key(&self, field: &str) -> Option<RecordKey> {
///         match field {
///             "id" => Some(RecordKey::from(self.id)),
///             "parent" => self.parent.map(RecordKey::from),
///             _ => None,
///         }
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             _ => Value::None,
///         }
///     }
///
///     fn without_field(&self, field: &str) -> Self {
///         let mut copy = self.clone();
///         if field == "children" {
///             copy.children.clear();
///         }
///         copy
///     }
///
///     fn set_children(&mut self, field: &str, children: Vec<Self>) {
///         if field == "children" {
///             self.children = children;
///         }
///     }
/// }
/// ```
pub trait TreeRecord: Clone {
    /// Returns the lookup key stored in `field`, or `None` if the field is
    /// absent or blank.
    fn field_key(&self, field: &str) -> Option<RecordKey>;

    /// Returns the value of `field` for ordering.
    ///
    /// Returns [`Value::None`] if the field doesn't exist or isn't orderable.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a copy of this record without `field`.
    fn without_field(&self, field: &str) -> Self;

    /// Stores `children` under `field`, replacing any previous value.
    fn set_children(&mut self, field: &str, children: Vec<Self>);
}

impl TreeRecord for serde_json::Map<String, serde_json::Value> {
    fn field_key(&self, field: &str) -> Option<RecordKey> {
        self.get(field).and_then(RecordKey::from_json)
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, Value::from_json)
    }

    fn without_field(&self, field: &str) -> Self {
        // Skip the field while copying so a nested subtree is never cloned.
        self.iter()
            .filter(|(name, _)| name.as_str() != field)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn set_children(&mut self, field: &str, children: Vec<Self>) {
        let children = children.into_iter().map(serde_json::Value::Object).collect();
        self.insert(field.to_string(), serde_json::Value::Array(children));
    }
}

/// Object values delegate to the map implementation. Any other JSON value is
/// a record without fields.
impl TreeRecord for serde_json::Value {
    fn field_key(&self, field: &str) -> Option<RecordKey> {
        self.get(field).and_then(RecordKey::from_json)
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        self.get(field).map_or(Value::None, Value::from_json)
    }

    fn without_field(&self, field: &str) -> Self {
        match self {
            serde_json::Value::Object(map) => serde_json::Value::Object(map.without_field(field)),
            other => other.clone(),
        }
    }

    fn set_children(&mut self, field: &str, children: Vec<Self>) {
        if let serde_json::Value::Object(map) = self {
            map.insert(field.to_string(), serde_json::Value::Array(children));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn key_blank_values() {
        assert_eq!(RecordKey::from_json(&json!(null)), None);
        assert_eq!(RecordKey::from_json(&json!("")), None);
        assert_eq!(RecordKey::from_json(&json!("  \t")), None);
        assert!(RecordKey::from_json(&json!(0)).is_some());
        assert!(RecordKey::from_json(&json!(false)).is_some());
    }

    #[test]
    fn key_keeps_json_kind() {
        let number = RecordKey::from_json(&json!(1));
        let text = RecordKey::from_json(&json!("1"));
        assert_ne!(number, text);
        assert_eq!(number, Some(RecordKey::from(1i64)));
        assert_eq!(text, RecordKey::text("1"));
    }

    #[test]
    fn key_display() {
        assert_eq!(RecordKey::from(7u64).to_string(), "7");
        assert_eq!(
            RecordKey::text("a").map(|k| k.as_str().to_string()),
            Some("\"a\"".to_string())
        );
    }

    #[test]
    fn map_record_access() {
        let record = json!({ "id": 3, "name": "root", "pid": "" });
        let map = record.as_object().unwrap();

        assert_eq!(map.field_key("id"), Some(RecordKey::from(3i64)));
        assert_eq!(map.field_key("pid"), None);
        assert_eq!(map.field_key("missing"), None);
        assert_eq!(map.field_value("name"), Value::String("root"));
        assert_eq!(map.field_value("id"), Value::Number(Number::I64(3)));
    }

    #[test]
    fn map_without_field() {
        let record = json!({ "id": 1, "children": [{ "id": 2 }] });
        let map = record.as_object().unwrap();
        let stripped = map.without_field("children");

        assert!(stripped.get("children").is_none());
        assert_eq!(stripped.get("id"), Some(&json!(1)));
        assert!(map.get("children").is_some());
    }

    #[test]
    fn map_set_children() {
        let mut parent = json!({ "id": 1 }).as_object().unwrap().clone();
        let child = json!({ "id": 2 }).as_object().unwrap().clone();
        parent.set_children("children", vec![child]);

        assert_eq!(
            serde_json::Value::Object(parent),
            json!({ "id": 1, "children": [{ "id": 2 }] })
        );
    }

    #[test]
    fn value_record_non_object() {
        let mut scalar = json!(5);
        assert_eq!(scalar.field_key("id"), None);
        assert_eq!(scalar.field_value("id"), Value::None);
        assert_eq!(scalar.without_field("id"), json!(5));
        scalar.set_children("children", vec![json!({ "id": 1 })]);
        assert_eq!(scalar, json!(5));
    }

    #[test]
    fn value_record_object() {
        let mut record = json!({ "id": "a", "children": [] });
        let mut stripped = record.without_field("children");
        assert_eq!(stripped, json!({ "id": "a" }));

        stripped.set_children("kids", vec![json!({ "id": "b" })]);
        assert_eq!(stripped, json!({ "id": "a", "kids": [{ "id": "b" }] }));

        record.set_children("children", vec![]);
        assert_eq!(record, json!({ "id": "a", "children": [] }));
    }
}
