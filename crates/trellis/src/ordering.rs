//! Ordering types for sibling groups.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based
//! ordering. [`compare_values`] is the shared comparison used whenever a tree
//! is ordered by a field name.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::TreeRecord;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Reverses `ordering` for `Desc`.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

/// Orders records by the value of one field.
///
/// This is the "order key field name" shorthand accepted by the tree
/// assembler. Missing and null values sort last in either direction.
/// Values of different kinds order by kind (booleans, then numbers, then
/// strings). Numbers compare exactly across integer and float forms, so
/// [`compare_records`](OrderBy::compare_records) is a total order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values according to this ordering.
    ///
    /// Returns `None` if the values cannot be compared (type mismatch or NaN).
    pub fn compare<'a>(&self, a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
        match (a, b) {
            // Absent values stay last regardless of direction
            (Value::None, _) | (_, Value::None) => compare_values(a, b),
            _ => compare_values(a, b).map(|ordering| self.dir.apply(ordering)),
        }
    }

    /// Compares two records by this ordering's field.
    ///
    /// Unlike [`compare`](OrderBy::compare) this never gives up: mismatched
    /// kinds fall back to kind rank, and a NaN (the only incomparable
    /// number) falls back to the IEEE total order.
    pub fn compare_records<R: TreeRecord>(&self, a: &R, b: &R) -> Ordering {
        let val_a = a.field_value(&self.field);
        let val_b = b.field_value(&self.field);
        if let Some(ordering) = self.compare(&val_a, &val_b) {
            return ordering;
        }
        let fallback = match (&val_a, &val_b) {
            (Value::Number(x), Value::Number(y)) => x.to_f64().total_cmp(&y.to_f64()),
            _ => kind_rank(&val_a).cmp(&kind_rank(&val_b)),
        };
        self.dir.apply(fallback)
    }
}

/// Compares two values of the same type.
///
/// Returns `None` if the types don't match or comparison is not possible (NaN).
pub fn compare_values<'a>(a: &Value<'a>, b: &Value<'a>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        // None values sort last
        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        // Type mismatch - cannot compare
        _ => None,
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::None => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Greater), Ordering::Less);
    }

    #[test]
    fn dir_serde_lowercase() {
        let dir: Dir = serde_json::from_value(json!("desc")).unwrap();
        assert_eq!(dir, Dir::Desc);
        assert_eq!(serde_json::to_value(Dir::Asc).unwrap(), json!("asc"));
    }

    #[test]
    fn order_by_defaults_to_ascending() {
        let order: OrderBy = serde_json::from_value(json!({ "field": "sort" })).unwrap();
        assert_eq!(order, OrderBy::asc("sort"));
    }

    #[test]
    fn compare_strings() {
        let a = Value::String("apple");
        let b = Value::String("banana");

        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));
        assert_eq!(compare_values(&b, &a), Some(Ordering::Greater));
        assert_eq!(compare_values(&a, &a), Some(Ordering::Equal));
    }

    #[test]
    fn compare_none_values() {
        let none = Value::None;
        let some = Value::String("test");

        assert_eq!(compare_values(&none, &some), Some(Ordering::Greater));
        assert_eq!(compare_values(&some, &none), Some(Ordering::Less));
        assert_eq!(compare_values(&none, &none), Some(Ordering::Equal));
    }

    #[test]
    fn compare_type_mismatch() {
        let s = Value::String("test");
        let n = Value::Number(Number::I64(42));

        assert_eq!(compare_values(&s, &n), None);
    }

    #[test]
    fn descending_keeps_none_last() {
        let desc = OrderBy::desc("field");
        let none = Value::None;
        let one = Value::Number(Number::I64(1));
        let two = Value::Number(Number::I64(2));

        assert_eq!(desc.compare(&one, &two), Some(Ordering::Greater));
        assert_eq!(desc.compare(&none, &one), Some(Ordering::Greater));
        assert_eq!(desc.compare(&one, &none), Some(Ordering::Less));
    }

    #[test]
    fn compare_records_non_finite_number_sorts_last() {
        let nan = serde_json::Map::from_iter([(
            "sort".to_string(),
            serde_json::Value::from(f64::NAN),
        )]);
        let one = serde_json::Map::from_iter([("sort".to_string(), json!(1.0))]);

        let asc = OrderBy::asc("sort");
        assert_eq!(asc.compare_records(&one, &nan), Ordering::Less);
    }

    #[test]
    fn compare_records_by_field() {
        let a = json!({ "sort": 2 });
        let b = json!({ "sort": 10 });
        let mismatched = json!({ "sort": "x" });

        let asc = OrderBy::asc("sort");
        assert_eq!(asc.compare_records(&a, &b), Ordering::Less);
        assert_eq!(OrderBy::desc("sort").compare_records(&a, &b), Ordering::Greater);
        assert_eq!(asc.compare_records(&a, &mismatched), Ordering::Less);
        assert_eq!(asc.compare_records(&mismatched, &a), Ordering::Greater);
    }

    #[test]
    fn compare_records_is_transitive_across_number_forms() {
        let big = json!({ "sort": 9_007_199_254_740_993_i64 });
        let float = json!({ "sort": 9_007_199_254_740_992.0 });
        let exact = json!({ "sort": 9_007_199_254_740_992_i64 });

        let asc = OrderBy::asc("sort");
        assert_eq!(asc.compare_records(&exact, &float), Ordering::Equal);
        assert_eq!(asc.compare_records(&float, &big), Ordering::Less);
        assert_eq!(asc.compare_records(&exact, &big), Ordering::Less);
    }
}
