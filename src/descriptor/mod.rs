//! # Record Descriptors
//!
//! This module turns raw user input (a type name, a field list, a rename flag
//! and optional defaults) into a `RecordDescriptor`: the canonical, immutable
//! blueprint a `RecordType` is synthesized from.
//!
//! ## Build Pipeline
//!
//! ```text
//! type name ──> check_type_name ───────────────────────────────┐
//!                                                              │
//! FieldNames ──> normalize ──> per-slot validate / dedupe ──> names[0..N]
//!   "a, b c"      ["a","b","c"]    rename? "_<slot>" : error     │
//!                                                              │
//! Defaults ──> resolve against final names ──> trailing suffix? ─┴─> RecordDescriptor
//! ```
//!
//! The build is atomic: either every step succeeds and a descriptor is
//! returned, or the first problem is reported and nothing is produced.
//!
//! ## Rename Policy
//!
//! With `rename(true)` every field that is invalid (for any `IdentIssue`) or
//! that repeats an earlier name is replaced by the placeholder `_<slot>`.
//! User field names may not start with `_`, so a placeholder never collides
//! with a real name and the build becomes total over any field list.
//!
//! ## Defaults Layout
//!
//! Defaults cover a contiguous trailing run of fields, exactly like default
//! arguments in a function signature: a required field never follows a
//! defaulted one.

use std::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::config::{FIELD_DELIMITERS, MAX_FIELDS, PLACEHOLDER_PREFIX};
use crate::error::{RecordError, Result};
use crate::ident::IdentPolicy;

/// Field list as supplied by the caller: either one delimited string or an
/// explicit list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNames {
    /// Names separated by commas and/or whitespace.
    Delimited(String),
    List(Vec<String>),
}

impl FieldNames {
    /// Splits the input into the ordered list of raw names.
    ///
    /// Delimited input skips empty segments, so `"a,, b"` is `["a", "b"]`.
    /// List entries are taken verbatim.
    pub fn normalize(&self) -> SmallVec<[String; 8]> {
        match self {
            FieldNames::Delimited(s) => s
                .split(|c: char| c.is_whitespace() || FIELD_DELIMITERS.contains(&c))
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            FieldNames::List(names) => names.iter().cloned().collect(),
        }
    }
}

impl From<&str> for FieldNames {
    fn from(s: &str) -> Self {
        FieldNames::Delimited(s.to_string())
    }
}

impl From<String> for FieldNames {
    fn from(s: String) -> Self {
        FieldNames::Delimited(s)
    }
}

impl From<Vec<String>> for FieldNames {
    fn from(names: Vec<String>) -> Self {
        FieldNames::List(names)
    }
}

impl From<Vec<&str>> for FieldNames {
    fn from(names: Vec<&str>) -> Self {
        FieldNames::List(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FieldNames {
    fn from(names: &[&str]) -> Self {
        FieldNames::List(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldNames {
    fn from(names: [&str; N]) -> Self {
        FieldNames::List(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Default values for a trailing run of fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Defaults<V> {
    None,
    /// Values for the last `k` fields, in slot order.
    Positional(Vec<V>),
    /// Values keyed by final (post-rename) field name.
    Named(Vec<(String, V)>),
}

impl<V> Default for Defaults<V> {
    fn default() -> Self {
        Defaults::None
    }
}

impl<V> Defaults<V> {
    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        Defaults::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<V>,
    {
        Defaults::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Defaults::None => 0,
            Defaults::Positional(values) => values.len(),
            Defaults::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Options accepted by the factory.
///
/// | Option | Default | Description |
/// |--------|---------|-------------|
/// | rename | false | Replace invalid/duplicate names with `_<slot>` instead of failing |
/// | defaults | none | Default values for a trailing run of fields |
/// | policy | `IdentPolicy::default()` | Reserved-word table used for validation |
#[derive(Debug, Clone)]
pub struct FactoryOptions<V> {
    rename: bool,
    defaults: Defaults<V>,
    policy: IdentPolicy,
}

impl<V> Default for FactoryOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FactoryOptions<V> {
    pub fn new() -> Self {
        Self {
            rename: false,
            defaults: Defaults::None,
            policy: IdentPolicy::default(),
        }
    }

    pub fn rename(mut self, rename: bool) -> Self {
        self.rename = rename;
        self
    }

    pub fn defaults(mut self, defaults: Defaults<V>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn policy(mut self, policy: IdentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_rename(&self) -> bool {
        self.rename
    }

    pub fn ident_policy(&self) -> &IdentPolicy {
        &self.policy
    }
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec<V> {
    name: String,
    slot: usize,
    default: Option<V>,
}

impl<V> FieldSpec<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn default(&self) -> Option<&V> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Canonical blueprint of a record type.
///
/// Invariants: names are unique, `fields[i].slot == i`, and the fields with
/// a default form a trailing suffix of length `defaults_count`.
#[derive(Clone, PartialEq)]
pub struct RecordDescriptor<V> {
    type_name: String,
    fields: Vec<FieldSpec<V>>,
    defaults_count: usize,
}

impl<V> RecordDescriptor<V> {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldSpec<V>] {
        &self.fields
    }

    pub fn field(&self, slot: usize) -> Option<&FieldSpec<V>> {
        self.fields.get(slot)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn defaults_count(&self) -> usize {
        self.defaults_count
    }

    /// Number of leading fields without a default.
    pub fn required_count(&self) -> usize {
        self.fields.len() - self.defaults_count
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl<V: fmt::Debug> fmt::Debug for RecordDescriptor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("defaults_count", &self.defaults_count)
            .finish()
    }
}

/// Builds a descriptor from raw input.
pub fn build<V>(
    type_name: &str,
    fields: impl Into<FieldNames>,
    options: FactoryOptions<V>,
) -> Result<RecordDescriptor<V>> {
    let FactoryOptions {
        rename,
        defaults,
        policy,
    } = options;

    policy
        .check_type_name(type_name)
        .map_err(|issue| RecordError::InvalidIdentifier {
            name: type_name.to_string(),
            slot: None,
            issue,
        })?;

    let mut names = fields.into().normalize();
    if names.len() > MAX_FIELDS {
        return Err(RecordError::TooManyFields {
            count: names.len(),
            max: MAX_FIELDS,
        });
    }

    let mut seen: HashMap<String, usize> = HashMap::with_capacity(names.len());
    for (slot, name) in names.iter_mut().enumerate() {
        let problem = match policy.check_field(name) {
            Err(issue) => Some(RecordError::InvalidIdentifier {
                name: name.clone(),
                slot: Some(slot),
                issue,
            }),
            Ok(()) => seen.get(name.as_str()).map(|&first_slot| RecordError::DuplicateField {
                name: name.clone(),
                slot,
                first_slot,
            }),
        };

        if let Some(err) = problem {
            if !rename {
                return Err(err);
            }
            let placeholder = format!("{}{}", PLACEHOLDER_PREFIX, slot);
            tracing::debug!(
                type_name,
                slot,
                original = %name,
                renamed = %placeholder,
                "renamed field"
            );
            *name = placeholder;
        }

        seen.insert(name.clone(), slot);
    }

    let mut slot_defaults = resolve_defaults(defaults, &names, &seen)?;
    let defaults_count = slot_defaults.iter().filter(|d| d.is_some()).count();

    let fields = names
        .into_iter()
        .enumerate()
        .map(|(slot, name)| FieldSpec {
            name,
            slot,
            default: slot_defaults[slot].take(),
        })
        .collect();

    Ok(RecordDescriptor {
        type_name: type_name.to_string(),
        fields,
        defaults_count,
    })
}

fn resolve_defaults<V>(
    defaults: Defaults<V>,
    names: &[String],
    slots: &HashMap<String, usize>,
) -> Result<Vec<Option<V>>> {
    let n = names.len();
    let mut out: Vec<Option<V>> = (0..n).map(|_| None).collect();

    match defaults {
        Defaults::None => {}
        Defaults::Positional(values) => {
            if values.len() > n {
                return Err(RecordError::InvalidDefaultsLayout {
                    reason: format!("{} defaults given for {} fields", values.len(), n),
                });
            }
            let start = n - values.len();
            for (offset, value) in values.into_iter().enumerate() {
                out[start + offset] = Some(value);
            }
        }
        Defaults::Named(pairs) => {
            if pairs.len() > n {
                return Err(RecordError::InvalidDefaultsLayout {
                    reason: format!("{} defaults given for {} fields", pairs.len(), n),
                });
            }
            for (name, value) in pairs {
                let slot = *slots.get(name.as_str()).ok_or_else(|| {
                    RecordError::InvalidDefaultsLayout {
                        reason: format!("default given for unknown field '{}'", name),
                    }
                })?;
                if out[slot].is_some() {
                    return Err(RecordError::InvalidDefaultsLayout {
                        reason: format!("default for field '{}' given more than once", name),
                    });
                }
                out[slot] = Some(value);
            }

            if let Some(first) = out.iter().position(Option::is_some) {
                if let Some(gap) = (first..n).find(|&slot| out[slot].is_none()) {
                    return Err(RecordError::InvalidDefaultsLayout {
                        reason: format!(
                            "defaults must cover a trailing run of fields, but '{}' (pos {}) has no default and follows defaulted field '{}' (pos {})",
                            names[gap], gap, names[first], first
                        ),
                    });
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::IdentIssue;

    fn names<V>(desc: &RecordDescriptor<V>) -> Vec<&str> {
        desc.names().collect()
    }

    #[test]
    fn delimited_and_list_inputs_normalize_identically() {
        let a = FieldNames::from("x, y  z,w");
        let b = FieldNames::from(vec!["x", "y", "z", "w"]);
        assert_eq!(a.normalize(), b.normalize());
    }

    #[test]
    fn delimited_input_skips_empty_segments() {
        let parts = FieldNames::from(" a,,b\t\nc , ").normalize();
        assert_eq!(parts.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn build_assigns_slots_in_declaration_order() {
        let desc = build::<i64>("Point", "x y z", FactoryOptions::new()).unwrap();
        assert_eq!(desc.type_name(), "Point");
        assert_eq!(desc.field_count(), 3);
        for (i, field) in desc.fields().iter().enumerate() {
            assert_eq!(field.slot(), i);
            assert!(field.is_required());
        }
        assert_eq!(names(&desc), ["x", "y", "z"]);
    }

    #[test]
    fn empty_field_list_is_allowed() {
        let desc = build::<i64>("Unit", "", FactoryOptions::new()).unwrap();
        assert_eq!(desc.field_count(), 0);
        assert_eq!(desc.required_count(), 0);
    }

    #[test]
    fn invalid_type_name_is_rejected_even_with_rename() {
        let err = build::<i64>("my-type", "a", FactoryOptions::new().rename(true)).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidIdentifier {
                name: "my-type".to_string(),
                slot: None,
                issue: IdentIssue::InvalidChar('-'),
            }
        );
    }

    #[test]
    fn duplicate_without_rename_fails() {
        let err = build::<i64>("T", ["a", "b", "a"], FactoryOptions::new()).unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateField {
                name: "a".to_string(),
                slot: 2,
                first_slot: 0,
            }
        );
    }

    #[test]
    fn duplicate_with_rename_uses_slot_placeholder() {
        let desc = build::<i64>("T", ["a", "a"], FactoryOptions::new().rename(true)).unwrap();
        assert_eq!(names(&desc), ["a", "_1"]);
    }

    #[test]
    fn rename_treats_invalid_and_duplicate_alike() {
        let desc = build::<i64>(
            "T",
            vec!["abc", "def", "ghi", "abc", "_x", "fn", "9z", ""],
            FactoryOptions::new().rename(true),
        )
        .unwrap();
        assert_eq!(names(&desc), ["abc", "def", "ghi", "_3", "_4", "_5", "_6", "_7"]);
    }

    #[test]
    fn leading_underscore_field_fails_without_rename() {
        let err = build::<i64>("T", "a _b", FactoryOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidIdentifier {
                slot: Some(1),
                issue: IdentIssue::LeadingUnderscore,
                ..
            }
        ));
    }

    #[test]
    fn reserved_word_depends_on_policy() {
        assert!(build::<i64>("T", "type", FactoryOptions::new()).is_err());
        let desc =
            build::<i64>("T", "type", FactoryOptions::new().policy(IdentPolicy::empty())).unwrap();
        assert_eq!(names(&desc), ["type"]);
    }

    #[test]
    fn positional_defaults_fill_trailing_fields() {
        let desc = build(
            "T",
            "a b c",
            FactoryOptions::new().defaults(Defaults::Positional(vec![2, 3])),
        )
        .unwrap();
        assert_eq!(desc.defaults_count(), 2);
        assert_eq!(desc.required_count(), 1);
        assert_eq!(desc.field(0).unwrap().default(), None);
        assert_eq!(desc.field(1).unwrap().default(), Some(&2));
        assert_eq!(desc.field(2).unwrap().default(), Some(&3));
    }

    #[test]
    fn too_many_positional_defaults_fail() {
        let err = build("T", "a", FactoryOptions::new().defaults(Defaults::Positional(vec![1, 2])))
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidDefaultsLayout { .. }));
    }

    #[test]
    fn named_defaults_must_form_a_suffix() {
        let err = build::<i32>(
            "T",
            "a b c",
            FactoryOptions::new().defaults(Defaults::named([("a", 1), ("c", 3)])),
        )
        .unwrap_err();
        match err {
            RecordError::InvalidDefaultsLayout { reason } => {
                assert!(reason.contains("'b'"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let desc = build::<i32>(
            "T",
            "a b c",
            FactoryOptions::new().defaults(Defaults::named([("c", 3), ("b", 2)])),
        )
        .unwrap();
        assert_eq!(desc.field(1).unwrap().default(), Some(&2));
        assert_eq!(desc.field(2).unwrap().default(), Some(&3));
    }

    #[test]
    fn named_defaults_reject_unknown_and_repeated_names() {
        let unknown = build::<i32>("T", "a b", FactoryOptions::new().defaults(Defaults::named([("z", 1)])))
            .unwrap_err();
        assert!(unknown.to_string().contains("'z'"));

        let repeated = build::<i32>(
            "T",
            "a b",
            FactoryOptions::new().defaults(Defaults::named([("b", 1), ("b", 2)])),
        )
        .unwrap_err();
        assert!(matches!(repeated, RecordError::InvalidDefaultsLayout { .. }));
    }

    #[test]
    fn named_defaults_refer_to_renamed_fields() {
        let desc = build::<i32>(
            "T",
            "a a",
            FactoryOptions::new()
                .rename(true)
                .defaults(Defaults::named([("_1", 7)])),
        )
        .unwrap();
        assert_eq!(desc.field(1).unwrap().default(), Some(&7));
    }

    #[test]
    fn too_many_fields_fail() {
        let fields: Vec<String> = (0..=MAX_FIELDS).map(|i| format!("f{}", i)).collect();
        let err = build::<i64>("Wide", fields, FactoryOptions::new()).unwrap_err();
        assert_eq!(
            err,
            RecordError::TooManyFields {
                count: MAX_FIELDS + 1,
                max: MAX_FIELDS,
            }
        );
    }
}
