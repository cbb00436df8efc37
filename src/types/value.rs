//! # Dynamic Record Values
//!
//! This module provides `Value`, a ready-made payload type for records whose
//! field types are only known at runtime. Records are generic over their
//! value type, so callers with a static payload (`i64`, `String`, their own
//! enum) never need it. `Value` exists for the dynamic case and for the byte
//! codec.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | Absent value |
//! | Bool | bool | Boolean |
//! | Int | i64 | 64-bit signed integer |
//! | Float | f64 | 64-bit floating point |
//! | Text | String | UTF-8 string |
//! | Blob | Vec<u8> | Binary data |
//!
//! ## Comparison Semantics
//!
//! Records compare, order and hash like tuples, which needs a *total* order
//! on their values. Unlike SQL semantics there is no UNKNOWN result:
//!
//! - Cross-type ordering: Null < Bool < Int/Float < Text < Blob
//! - Int vs Float: compared by exact numeric value, without rounding the
//!   Int through `f64`; when numerically equal the Int sorts first, so
//!   `Int(1) != Float(1.0)`
//! - Float vs Float: `f64::total_cmp` (`-0.0 < 0.0`, NaN sorts last and
//!   equals itself)
//!
//! Equality is derived from the ordering and hashing uses the float bit
//! pattern, so `a == b` implies `hash(a) == hash(b)`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns true if this value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as f64, promoting Int.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Blob(_) => 4,
        }
    }

    /// Total comparison used by `Ord`.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(i), Value::Float(f)) => cmp_int_float(*i, *f).then(Ordering::Less),
            (Value::Float(f), Value::Int(i)) => {
                cmp_int_float(*i, *f).reverse().then(Ordering::Greater)
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

/// Exact numeric comparison of an `i64` with an `f64`.
///
/// NaN is placed where `total_cmp` puts it: a negative NaN below every
/// number, a positive NaN above.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable; every i64 is below it.
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        ord => ord,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        std::mem::discriminant(self).hash(hasher);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(hasher),
            Value::Int(i) => i.hash(hasher),
            Value::Float(f) => f.to_bits().hash(hasher),
            Value::Text(s) => s.hash(hasher),
            Value::Blob(b) => b.hash(hasher),
        }
    }
}

/// Structural representation, used inside record reprs.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Blob(b) => {
                write!(f, "b\"")?;
                for byte in b {
                    write!(f, "{}", std::ascii::escape_default(*byte))?;
                }
                write!(f, "\"")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: &Value) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn cross_type_ordering_follows_type_rank() {
        let ordered = [
            Value::Null,
            Value::Bool(true),
            Value::Int(-5),
            Value::Float(0.5),
            Value::Text("a".into()),
            Value::Blob(vec![0]),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn int_and_float_compare_numerically() {
        assert!(Value::Int(2) < Value::Float(2.5));
        assert!(Value::Float(1.5) < Value::Int(2));
        assert!(Value::Int(1) < Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn int_and_float_compare_exactly_beyond_f64_precision() {
        let two_pow_53 = (1i64 << 53) as f64;
        assert!(Value::Int((1 << 53) + 1) > Value::Float(two_pow_53));
        assert!(Value::Float(two_pow_53) < Value::Int((1 << 53) + 1));
        assert!(Value::Int(1 << 53) < Value::Float(two_pow_53));

        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) < Value::Float(i64::MIN as f64));
        assert!(Value::Int(i64::MIN) > Value::Float(-9_223_372_036_854_777_856.0));

        assert!(Value::Int(-1) > Value::Float(-1.5));
        assert!(Value::Int(-2) < Value::Float(-1.5));
        assert!(Value::Int(0) > Value::Float(-1e-300));
        assert!(Value::Int(0) < Value::Float(-0.0));

        assert!(Value::Int(i64::MAX) < Value::Float(f64::INFINITY));
        assert!(Value::Int(i64::MIN) > Value::Float(f64::NEG_INFINITY));
        assert!(Value::Int(i64::MAX) < Value::Float(f64::NAN));
        assert!(Value::Int(i64::MIN) > Value::Float(-f64::NAN));
    }

    #[test]
    fn mixed_numeric_sort_is_consistent() {
        let mut values = vec![
            Value::Float(two_pow(53)),
            Value::Int((1 << 53) + 1),
            Value::Int(1 << 53),
            Value::Float(-0.0),
            Value::Int(0),
            Value::Float(0.0),
            Value::Float(0.5),
            Value::Int(-1),
            Value::Float(-1.0),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Int(-1),
                Value::Float(-1.0),
                Value::Int(0),
                Value::Float(-0.0),
                Value::Float(0.0),
                Value::Float(0.5),
                Value::Int(1 << 53),
                Value::Float(two_pow(53)),
                Value::Int((1 << 53) + 1),
            ]
        );
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
            assert!(pair[1] > pair[0]);
        }
    }

    fn two_pow(exp: i32) -> f64 {
        2f64.powi(exp)
    }

    #[test]
    fn nan_equals_itself_and_hashes_consistently() {
        let a = Value::Float(f64::NAN);
        let b = Value::Float(f64::NAN);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(Value::Float(f64::INFINITY) < a);
    }

    #[test]
    fn equal_values_hash_equal() {
        assert_eq!(hash_of(&Value::from("x")), hash_of(&Value::Text("x".to_string())));
        assert_ne!(hash_of(&Value::Int(0)), hash_of(&Value::Bool(false)));
    }

    #[test]
    fn debug_is_structural() {
        assert_eq!(format!("{:?}", Value::Null), "null");
        assert_eq!(format!("{:?}", Value::Int(3)), "3");
        assert_eq!(format!("{:?}", Value::Float(1.0)), "1.0");
        assert_eq!(format!("{:?}", Value::from("hi")), "\"hi\"");
        assert_eq!(format!("{:?}", Value::Blob(vec![b'a', 0])), "b\"a\\x00\"");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".into()));
        assert_eq!(Value::Int(4).as_float(), Some(4.0));
        assert_eq!(Value::Text("a".into()).as_int(), None);
        assert_eq!(Value::Bool(true).kind(), "bool");
    }
}
