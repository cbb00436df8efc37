//! # Record Factory Errors
//!
//! Every failure the factory, the synthesized constructors and the accessors
//! can produce. Each variant names the offending field and/or slot so that
//! the message alone is enough to fix the call site.
//!
//! ## Error Kinds
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `InvalidIdentifier` | descriptor build (type name or field name) |
//! | `DuplicateField` | descriptor build, rename disabled |
//! | `InvalidDefaultsLayout` | descriptor build |
//! | `TooManyFields` | descriptor build, constructors |
//! | `ArityError` | positional construction, `make` |
//! | `MissingField` | keyword/mapping construction |
//! | `UnknownField` | keyword/mapping construction, `replace`, name access |
//! | `ConflictingArgument` | mixed construction |
//! | `IndexOutOfRange` | positional access |
//!
//! All operations are pure: retrying with the same inputs always fails the
//! same way.

use thiserror::Error;

use crate::ident::IdentIssue;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RecordError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A type name or field name is not a usable identifier.
    ///
    /// `slot` is `None` for the type name.
    #[error("{}", invalid_identifier_message(.name, .slot, .issue))]
    InvalidIdentifier {
        name: String,
        slot: Option<usize>,
        issue: IdentIssue,
    },

    #[error("encountered duplicate field name '{name}' at position {slot} (first declared at position {first_slot})")]
    DuplicateField {
        name: String,
        slot: usize,
        first_slot: usize,
    },

    #[error("invalid defaults layout: {reason}")]
    InvalidDefaultsLayout { reason: String },

    #[error("cannot create a record type with more than {max} fields ({count} given)")]
    TooManyFields { count: usize, max: usize },

    #[error("{type_name} takes from {min} to {max} positional arguments ({given} given)")]
    ArityError {
        type_name: String,
        min: usize,
        max: usize,
        given: usize,
    },

    #[error("{type_name}: required field '{name}' (pos {slot}) not found")]
    MissingField {
        type_name: String,
        name: String,
        slot: usize,
    },

    #[error("{type_name} has no field '{name}'")]
    UnknownField { type_name: String, name: String },

    #[error("{type_name}: field '{name}' given more than once (pos {slot})")]
    ConflictingArgument {
        type_name: String,
        name: String,
        slot: usize,
    },

    #[error("{type_name} index {index} out of range for {len} fields")]
    IndexOutOfRange {
        type_name: String,
        index: usize,
        len: usize,
    },
}

fn invalid_identifier_message(name: &str, slot: &Option<usize>, issue: &IdentIssue) -> String {
    match *slot {
        Some(slot) => format!("invalid field name {:?} at position {}: {}", name, slot, issue),
        None => format!("invalid type name {:?}: {}", name, issue),
    }
}

impl RecordError {
    /// The field name this error refers to, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            RecordError::InvalidIdentifier { name, slot, .. } => slot.map(|_| name.as_str()),
            RecordError::DuplicateField { name, .. }
            | RecordError::MissingField { name, .. }
            | RecordError::UnknownField { name, .. }
            | RecordError::ConflictingArgument { name, .. } => Some(name),
            RecordError::InvalidDefaultsLayout { .. }
            | RecordError::TooManyFields { .. }
            | RecordError::ArityError { .. }
            | RecordError::IndexOutOfRange { .. } => None,
        }
    }
}
