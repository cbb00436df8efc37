//! # Identifier Validation
//!
//! This module decides whether a string is usable as a type name or a field
//! name. The rules are the usual identifier rules plus a configurable set of
//! reserved words:
//!
//! | Check | Rejects | Applies to |
//! |-------|---------|------------|
//! | `Empty` | `""` | type name, fields |
//! | `TooLong` | more than `MAX_NAME_LEN` bytes | type name, fields |
//! | `LeadingDigit` | `1abc` | type name, fields |
//! | `InvalidChar` | `a-b`, `a b`, `é` | type name, fields |
//! | `Reserved` | `type`, `fn` (default policy) | type name, fields |
//! | `LeadingUnderscore` | `_x`, `_a-b` | fields only |
//!
//! Identifiers are ASCII: a letter or `_` followed by letters, digits and
//! underscores.
//!
//! ## Pluggable Policy
//!
//! The reserved-word table is not hard-coded. `IdentPolicy::default()`
//! reserves Rust's keywords (`config::DEFAULT_RESERVED_WORDS`), which is the
//! set of names that could never become generated accessors in this host.
//! `IdentPolicy::empty()` reserves nothing and `reserve` adds words.
//!
//! ```ignore
//! let policy = IdentPolicy::empty().reserve("select").reserve("from");
//! assert_eq!(policy.check_field("from"), Err(IdentIssue::Reserved));
//! ```

use std::fmt;

use hashbrown::HashSet;

use crate::config::{DEFAULT_RESERVED_WORDS, MAX_NAME_LEN, RESERVED_FIELD_PREFIX};

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentIssue {
    Empty,
    /// Longer than `config::MAX_NAME_LEN` bytes; carries the actual length.
    TooLong(usize),
    LeadingDigit,
    LeadingUnderscore,
    InvalidChar(char),
    Reserved,
}

impl fmt::Display for IdentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentIssue::Empty => write!(f, "names cannot be empty"),
            IdentIssue::TooLong(len) => write!(
                f,
                "names cannot be longer than {} bytes ({} given)",
                MAX_NAME_LEN, len
            ),
            IdentIssue::LeadingDigit => write!(f, "names cannot start with a number"),
            IdentIssue::LeadingUnderscore => write!(f, "field names cannot start with an underscore"),
            IdentIssue::InvalidChar(c) => write!(
                f,
                "names can only contain alphanumeric characters and underscores (found {:?})",
                c
            ),
            IdentIssue::Reserved => write!(f, "names cannot be a reserved word"),
        }
    }
}

/// Reserved-word policy used when validating names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentPolicy {
    reserved: HashSet<String>,
}

impl Default for IdentPolicy {
    fn default() -> Self {
        Self::empty().with_words(DEFAULT_RESERVED_WORDS.iter().copied())
    }
}

impl IdentPolicy {
    /// A policy that reserves no words.
    pub fn empty() -> Self {
        Self {
            reserved: HashSet::new(),
        }
    }

    pub fn reserve(mut self, word: impl Into<String>) -> Self {
        self.reserved.insert(word.into());
        self
    }

    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Validates a record type name. A leading underscore is allowed.
    pub fn check_type_name(&self, name: &str) -> Result<(), IdentIssue> {
        check_length(name)?;
        check_chars(name)?;
        if self.is_reserved(name) {
            return Err(IdentIssue::Reserved);
        }
        Ok(())
    }

    /// Validates a field name.
    ///
    /// The underscore check runs before the character scan, so `_a-b` is
    /// reported as `LeadingUnderscore`.
    pub fn check_field(&self, name: &str) -> Result<(), IdentIssue> {
        check_length(name)?;
        if name.starts_with(RESERVED_FIELD_PREFIX) {
            return Err(IdentIssue::LeadingUnderscore);
        }
        check_chars(name)?;
        if self.is_reserved(name) {
            return Err(IdentIssue::Reserved);
        }
        Ok(())
    }
}

fn check_length(name: &str) -> Result<(), IdentIssue> {
    if name.is_empty() {
        return Err(IdentIssue::Empty);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(IdentIssue::TooLong(name.len()));
    }
    Ok(())
}

fn check_chars(name: &str) -> Result<(), IdentIssue> {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(IdentIssue::LeadingDigit);
    }
    match name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        Some(c) => Err(IdentIssue::InvalidChar(c)),
        None => Ok(()),
    }
}
