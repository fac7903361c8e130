//! Runtime value types for sibling ordering.
//!
//! The [`Value`] enum is a borrowed view of one record field, used when a
//! tree is ordered by a field name rather than a custom comparator.

use std::cmp::Ordering;

/// Field value borrowed from a record.
///
/// # Example
///
/// ```
/// use trellis::{Number, Value};
///
/// let json = serde_json::json!(42);
/// assert_eq!(Value::from_json(&json), Value::Number(Number::I64(42)));
/// assert_eq!(Value::from_json(&serde_json::Value::Null), Value::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not orderable.
    None,
}

impl<'a> Value<'a> {
    /// Views a JSON value. Arrays and objects are not orderable and map to
    /// [`Value::None`].
    pub fn from_json(json: &'a serde_json::Value) -> Self {
        match json {
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Number(n) => Number::from_json(n).map_or(Value::None, Value::Number),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => Value::None,
        }
    }
}

/// A JSON number kept in its widest exact form.
///
/// Integers compare exactly against each other and against floats, so
/// `I64(2^53 + 1)` stays above `F64(2^53)`. Only NaN is incomparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

/// 2^63, the first float past `i64::MAX`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;
/// 2^64, the first float past `u64::MAX`.
const U64_END: f64 = 18_446_744_073_709_551_616.0;

impl Number {
    /// Converts a JSON number, preferring the integer variants.
    pub fn from_json(n: &serde_json::Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Number::I64(i))
        } else if let Some(u) = n.as_u64() {
            Some(Number::U64(u))
        } else {
            n.as_f64().map(Number::F64)
        }
    }

    /// Lossy conversion to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers exactly across variants.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // A negative i64 is below every u64
            (Number::I64(a), Number::U64(b)) => Some(match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            }),
            (Number::I64(a), Number::F64(b)) => cmp_i64_f64(a, b),
            (Number::U64(a), Number::F64(b)) => cmp_u64_f64(a, b),

            (Number::U64(_), Number::I64(_))
            | (Number::F64(_), Number::I64(_))
            | (Number::F64(_), Number::U64(_)) => other.compare(self).map(Ordering::reverse),
        }
    }
}

fn cmp_i64_f64(a: i64, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b >= I64_END {
        return Some(Ordering::Less);
    }
    if b < -I64_END {
        return Some(Ordering::Greater);
    }
    // In range, so the truncated float converts without loss
    let whole = b.trunc();
    Some(a.cmp(&(whole as i64)).then(fraction_side(b, whole)))
}

fn cmp_u64_f64(a: u64, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b >= U64_END {
        return Some(Ordering::Less);
    }
    if b < 0.0 {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    Some(a.cmp(&(whole as u64)).then(fraction_side(b, whole)))
}

/// Where an integer equal to `whole` sits relative to `b`.
fn fraction_side(b: f64, whole: f64) -> Ordering {
    if b > whole {
        Ordering::Less
    } else if b < whole {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TWO_53: i64 = 1 << 53;

    #[test]
    fn value_from_json() {
        let s = json!("name");
        let n = json!(-3);
        let u = json!(u64::MAX);
        let f = json!(1.5);
        let b = json!(true);
        let list = json!([1, 2]);

        assert_eq!(Value::from_json(&s), Value::String("name"));
        assert_eq!(Value::from_json(&n), Value::Number(Number::I64(-3)));
        assert_eq!(Value::from_json(&u), Value::Number(Number::U64(u64::MAX)));
        assert_eq!(Value::from_json(&f), Value::Number(Number::F64(1.5)));
        assert_eq!(Value::from_json(&b), Value::Bool(true));
        assert_eq!(Value::from_json(&list), Value::None);
    }

    #[test]
    fn same_variant_comparisons() {
        assert_eq!(Number::I64(5).compare(Number::I64(10)), Some(Ordering::Less));
        assert_eq!(Number::U64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::F64(5.0).compare(Number::F64(10.0)), Some(Ordering::Less));
    }

    #[test]
    fn mixed_integer_comparisons() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Some(Ordering::Less));
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn integer_against_float_is_exact() {
        let above = Number::I64(TWO_53 + 1);
        let float = Number::F64(TWO_53 as f64);
        let exact = Number::I64(TWO_53);

        assert_eq!(above.compare(float), Some(Ordering::Greater));
        assert_eq!(float.compare(above), Some(Ordering::Less));
        assert_eq!(exact.compare(float), Some(Ordering::Equal));
        assert_eq!(above.compare(exact), Some(Ordering::Greater));
    }

    #[test]
    fn integer_against_fractional_float() {
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::I64(5).compare(Number::F64(5.5)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::F64(-0.5)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::F64(-1.5)), Some(Ordering::Greater));
        assert_eq!(Number::U64(0).compare(Number::F64(-0.5)), Some(Ordering::Greater));
        assert_eq!(Number::U64(0).compare(Number::F64(-0.0)), Some(Ordering::Equal));
        assert_eq!(Number::U64(3).compare(Number::F64(3.25)), Some(Ordering::Less));
    }

    #[test]
    fn integer_against_out_of_range_float() {
        assert_eq!(Number::I64(i64::MAX).compare(Number::F64(I64_END)), Some(Ordering::Less));
        assert_eq!(Number::I64(i64::MIN).compare(Number::F64(-I64_END)), Some(Ordering::Equal));
        assert_eq!(Number::U64(u64::MAX).compare(Number::F64(U64_END)), Some(Ordering::Less));
        assert_eq!(Number::I64(0).compare(Number::F64(f64::INFINITY)), Some(Ordering::Less));
        assert_eq!(
            Number::U64(0).compare(Number::F64(f64::NEG_INFINITY)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn nan_is_incomparable() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(Number::I64(1).compare(Number::F64(f64::NAN)), None);
        assert_eq!(Number::F64(f64::NAN).compare(Number::U64(1)), None);
    }
}
