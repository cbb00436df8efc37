//! # Record - Immutable Named Tuples
//!
//! This module provides `Record`, an instance of a synthesized `RecordType`:
//! a fixed-length, immutable sequence of values whose slots can also be
//! reached by field name.
//!
//! ## Usage
//!
//! ```ignore
//! let p = point.new_record([1, 2])?;
//! assert_eq!(p.field("x")?, &1);   // by name, O(1)
//! assert_eq!(p.at(1)?, &2);        // by slot
//! assert_eq!(p[0], 1);             // slice indexing through Deref
//! assert_eq!(&p[..1], &[1]);       // slices are plain sequences
//!
//! let q = p.replace(kwargs!(y = 5))?;   // p is untouched
//! let d = p.asdict();                   // IndexMap {"x": 1, "y": 2}
//! assert_eq!(format!("{:?}", p), "Point(x=1, y=2)");
//! ```
//!
//! ## Tuple Semantics
//!
//! Equality, ordering and hashing look at the values only, exactly like an
//! anonymous tuple. Two records of *different* types with equal values
//! compare equal, and a record compares equal to a slice or `Vec` holding the
//! same values. `Hash` matches `[V]`'s, which makes `Borrow<[V]>` sound.
//!
//! A record dereferences to `[V]`, so every read-only slice operation
//! (`len`, `iter`, `contains`, `first`, range indexing, `concat`, ...) is
//! available and yields plain slices or vectors, never records.
//!
//! ## Thread Safety
//!
//! No method takes `&mut self`. A record is `Send + Sync` whenever `V` is.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{RecordError, Result};
use crate::records::args::Args;
use crate::records::record_type::RecordType;

pub struct Record<V> {
    ty: RecordType<V>,
    values: Box<[V]>,
}

impl<V> Record<V> {
    pub(crate) fn from_parts(ty: RecordType<V>, values: Box<[V]>) -> Self {
        debug_assert_eq!(values.len(), ty.field_count());
        Self { ty, values }
    }

    pub fn record_type(&self) -> &RecordType<V> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.type_name()
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.ty.fields()
    }

    /// Value of the named field.
    pub fn field(&self, name: &str) -> Result<&V> {
        let slot = self.ty.lookup(name)?;
        Ok(&self.values[slot])
    }

    /// Value at `slot`.
    pub fn at(&self, slot: usize) -> Result<&V> {
        self.values
            .get(slot)
            .ok_or_else(|| RecordError::IndexOutOfRange {
                type_name: self.type_name().to_string(),
                index: slot,
                len: self.values.len(),
            })
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// `(name, value)` pairs in slot order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = (&str, &V)> + '_ {
        self.ty.fields().zip(self.values.iter())
    }

    /// The values as a plain sequence.
    pub fn into_values(self) -> Vec<V> {
        self.values.into_vec()
    }
}

impl<V: Clone> Record<V> {
    /// Name -> value mapping in slot order.
    ///
    /// Every call returns a fresh map; mutating it never affects the record.
    pub fn asdict(&self) -> IndexMap<String, V> {
        self.asdict_with()
    }

    /// Like `asdict`, building whatever mapping type the caller wants.
    ///
    /// ```ignore
    /// let ordered: IndexMap<String, V> = rec.asdict_with();
    /// let sorted: BTreeMap<String, V> = rec.asdict_with();
    /// let pairs: Vec<(String, V)> = rec.asdict_with();
    /// ```
    pub fn asdict_with<M>(&self) -> M
    where
        M: FromIterator<(String, V)>,
    {
        self.items()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    /// Returns a new record with the named fields replaced.
    ///
    /// Only keyword arguments are accepted. Fails with `UnknownField` for a
    /// name that is not a field and `ConflictingArgument` for a name given
    /// twice; `self` is never modified.
    pub fn replace(&self, changes: impl Into<Args<V>>) -> Result<Record<V>> {
        let changes = changes.into();
        if changes.positional_len() > 0 {
            return Err(RecordError::ArityError {
                type_name: format!("{}.replace", self.type_name()),
                min: 0,
                max: 0,
                given: changes.positional_len(),
            });
        }

        let (_, keywords) = changes.into_parts();
        let mut values = self.values.to_vec();
        let mut touched: SmallVec<[usize; 8]> = SmallVec::new();
        for (name, value) in keywords {
            let slot = self.ty.lookup(&name)?;
            if touched.contains(&slot) {
                return Err(RecordError::ConflictingArgument {
                    type_name: self.type_name().to_string(),
                    name,
                    slot,
                });
            }
            touched.push(slot);
            values[slot] = value;
        }

        Ok(Record::from_parts(self.ty.clone(), values.into_boxed_slice()))
    }

    pub fn to_vec(&self) -> Vec<V> {
        self.values.to_vec()
    }

    /// Concatenation degrades to a plain sequence.
    pub fn concat(&self, other: &[V]) -> Vec<V> {
        let mut out = Vec::with_capacity(self.values.len() + other.len());
        out.extend_from_slice(&self.values);
        out.extend_from_slice(other);
        out
    }
}

impl<V: fmt::Debug> Record<V> {
    /// `TypeName(field1=value1, field2=value2)`.
    pub fn repr(&self) -> String {
        format!("{:?}", self)
    }
}

impl<V: Clone> Clone for Record<V> {
    fn clone(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            values: self.values.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Record<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, (name, value)) in self.items().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", name, value)?;
        }
        write!(f, ")")
    }
}

impl<V> Deref for Record<V> {
    type Target = [V];

    fn deref(&self) -> &[V] {
        &self.values
    }
}

impl<V> AsRef<[V]> for Record<V> {
    fn as_ref(&self) -> &[V] {
        &self.values
    }
}

impl<V> Borrow<[V]> for Record<V> {
    fn borrow(&self) -> &[V] {
        &self.values
    }
}

impl<'a, V> IntoIterator for &'a Record<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<V> IntoIterator for Record<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_vec().into_iter()
    }
}

impl<V: PartialEq> PartialEq for Record<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V: Eq> Eq for Record<V> {}

impl<V: PartialEq> PartialEq<[V]> for Record<V> {
    fn eq(&self, other: &[V]) -> bool {
        *self.values == *other
    }
}

impl<V: PartialEq> PartialEq<Vec<V>> for Record<V> {
    fn eq(&self, other: &Vec<V>) -> bool {
        *self.values == other[..]
    }
}

impl<V: PartialEq, const N: usize> PartialEq<[V; N]> for Record<V> {
    fn eq(&self, other: &[V; N]) -> bool {
        *self.values == other[..]
    }
}

impl<V: PartialOrd> PartialOrd for Record<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.values.partial_cmp(&other.values)
    }
}

impl<V: Ord> Ord for Record<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values.cmp(&other.values)
    }
}

impl<V: Hash> Hash for Record<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values[..].hash(state)
    }
}
