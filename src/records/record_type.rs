//! # RecordType - Synthesized Record Types
//!
//! This module provides `RecordType`, the type synthesizer's output. A
//! `RecordType` owns one `RecordDescriptor` plus the precomputed lookup
//! tables that make name access O(1), and it exposes the constructors that
//! produce `Record` instances.
//!
//! ## Lookup Tables
//!
//! - slot -> name: the descriptor's field vector, indexed directly
//! - name -> slot: a hash map built once in `synthesize`
//!
//! ## Constructors
//!
//! | Method | Input | Defaults applied | Failure modes |
//! |--------|-------|------------------|---------------|
//! | `new_record` | positional values | yes | `ArityError` |
//! | `from_kwargs` | name/value pairs | yes | `UnknownField`, `MissingField`, `ConflictingArgument` |
//! | `call` | positional + keyword | yes | all of the above |
//! | `from_mapping` | key/value mapping | yes | `UnknownField` (strict), `MissingField` |
//! | `make` | exactly N values | no | `ArityError` |
//!
//! Every constructor is O(N) and moves each value into the record exactly
//! once; defaults are cloned from the descriptor.
//!
//! ## Thread Safety
//!
//! A `RecordType` is an `Arc` handle to immutable data. Cloning it is cheap
//! and it is `Send + Sync` whenever the value type is.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::config::MAX_FIELDS;
use crate::descriptor::RecordDescriptor;
use crate::error::{RecordError, Result};
use crate::records::args::Args;
use crate::records::record::Record;

struct TypeInner<V> {
    descriptor: RecordDescriptor<V>,
    slots: HashMap<String, usize>,
}

pub struct RecordType<V> {
    inner: Arc<TypeInner<V>>,
}

impl<V> Clone for RecordType<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> RecordType<V> {
    /// Builds the record type described by `descriptor`.
    pub fn synthesize(descriptor: RecordDescriptor<V>) -> Self {
        let slots = descriptor
            .names()
            .enumerate()
            .map(|(slot, name)| (name.to_string(), slot))
            .collect();

        tracing::debug!(
            type_name = descriptor.type_name(),
            field_count = descriptor.field_count(),
            defaults_count = descriptor.defaults_count(),
            "synthesized record type"
        );

        Self {
            inner: Arc::new(TypeInner { descriptor, slots }),
        }
    }

    pub fn type_name(&self) -> &str {
        self.inner.descriptor.type_name()
    }

    pub fn descriptor(&self) -> &RecordDescriptor<V> {
        &self.inner.descriptor
    }

    pub fn field_count(&self) -> usize {
        self.inner.descriptor.field_count()
    }

    pub fn required_count(&self) -> usize {
        self.inner.descriptor.required_count()
    }

    pub fn defaults_count(&self) -> usize {
        self.inner.descriptor.defaults_count()
    }

    /// Field names in slot order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.inner.descriptor.names()
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.inner.slots.get(name).copied()
    }

    pub fn name_of(&self, slot: usize) -> Option<&str> {
        self.inner.descriptor.field(slot).map(|f| f.name())
    }

    pub fn default_for(&self, slot: usize) -> Option<&V> {
        self.inner.descriptor.field(slot).and_then(|f| f.default())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.inner.slots.contains_key(name)
    }

    /// True if both handles come from the same `synthesize` call.
    ///
    /// This is type identity, not structural equality: two types built from
    /// identical input are still different types.
    pub fn same_type(&self, other: &RecordType<V>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Builds an instance from exactly `field_count` values. Defaults are
    /// not consulted.
    pub fn make<I>(&self, values: I) -> Result<Record<V>>
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        let n = self.field_count();
        let values: Vec<V> = values.into_iter().map(Into::into).collect();
        if values.len() != n {
            return Err(RecordError::ArityError {
                type_name: self.type_name().to_string(),
                min: n,
                max: n,
                given: values.len(),
            });
        }
        Ok(Record::from_parts(self.clone(), values.into_boxed_slice()))
    }

    pub(crate) fn unknown_field(&self, name: &str) -> RecordError {
        RecordError::UnknownField {
            type_name: self.type_name().to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<usize> {
        self.slot_of(name).ok_or_else(|| self.unknown_field(name))
    }

    fn arity_error(&self, given: usize) -> RecordError {
        RecordError::ArityError {
            type_name: self.type_name().to_string(),
            min: self.required_count(),
            max: self.field_count(),
            given,
        }
    }

    fn conflict(&self, slot: usize) -> RecordError {
        RecordError::ConflictingArgument {
            type_name: self.type_name().to_string(),
            name: self.name_of(slot).unwrap_or_default().to_string(),
            slot,
        }
    }
}

impl<V: Clone> RecordType<V> {
    /// Construct-by-position. Trailing omitted values take their defaults.
    pub fn new_record<I>(&self, values: I) -> Result<Record<V>>
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        let n = self.field_count();
        let given: SmallVec<[V; 8]> = values.into_iter().map(Into::into).collect();
        if given.len() < self.required_count() || given.len() > n {
            return Err(self.arity_error(given.len()));
        }

        let mut slots: SmallVec<[Option<V>; 8]> = given.into_iter().map(Some).collect();
        slots.resize(n, None);
        self.fill(slots)
    }

    /// Construct-by-keyword. Keyword order does not affect the layout.
    pub fn from_kwargs<I, K, T>(&self, kwargs: I) -> Result<Record<V>>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<V>,
    {
        self.call(Args::keywords(kwargs))
    }

    /// Mixed positional and keyword construction.
    pub fn call(&self, args: Args<V>) -> Result<Record<V>> {
        let n = self.field_count();
        let total = args.len();
        if total > MAX_FIELDS {
            return Err(RecordError::TooManyFields {
                count: total,
                max: MAX_FIELDS,
            });
        }
        if total > n {
            return Err(self.arity_error(total));
        }

        let (positional, keywords) = args.into_parts();
        let positional_len = positional.len();
        let mut slots: SmallVec<[Option<V>; 8]> = positional.into_iter().map(Some).collect();
        slots.resize(n, None);

        for (name, value) in keywords {
            let slot = self.lookup(&name)?;
            if slot < positional_len || slots[slot].is_some() {
                return Err(self.conflict(slot));
            }
            slots[slot] = Some(value);
        }

        self.fill(slots)
    }

    /// Construct-from-mapping.
    ///
    /// With `strict` set, a key that is not a field fails with
    /// `UnknownField`; otherwise such keys are ignored. A key repeated in
    /// the input keeps its last value.
    pub fn from_mapping<I, K, T>(&self, mapping: I, strict: bool) -> Result<Record<V>>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: Into<V>,
    {
        let mut slots: SmallVec<[Option<V>; 8]> = SmallVec::new();
        slots.resize(self.field_count(), None);

        for (key, value) in mapping {
            let key = key.as_ref();
            match self.slot_of(key) {
                Some(slot) => slots[slot] = Some(value.into()),
                None if strict => return Err(self.unknown_field(key)),
                None => {}
            }
        }

        self.fill(slots)
    }

    fn fill(&self, slots: SmallVec<[Option<V>; 8]>) -> Result<Record<V>> {
        let mut values = Vec::with_capacity(slots.len());
        for (slot, value) in slots.into_iter().enumerate() {
            match value.or_else(|| self.default_for(slot).cloned()) {
                Some(v) => values.push(v),
                None => {
                    return Err(RecordError::MissingField {
                        type_name: self.type_name().to_string(),
                        name: self.name_of(slot).unwrap_or_default().to_string(),
                        slot,
                    })
                }
            }
        }
        Ok(Record::from_parts(self.clone(), values.into_boxed_slice()))
    }
}

impl<V: fmt::Debug> fmt::Debug for RecordType<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("type_name", &self.type_name())
            .field("fields", &self.fields().collect::<Vec<_>>())
            .field("defaults_count", &self.defaults_count())
            .finish()
    }
}
