//! # namedrec - Named Record Types Built at Runtime
//!
//! namedrec builds named, fixed-arity, immutable record types from a type
//! name and a field list. Instances behave like tuples (structural equality,
//! ordering, hashing, slicing, iteration) and also expose their slots by
//! field name.
//!
//! ## Quick Start
//!
//! ```ignore
//! use namedrec::{kwargs, make_record_type, Defaults, FactoryOptions};
//!
//! let point = make_record_type(
//!     "Point",
//!     "x, y z",
//!     FactoryOptions::new().defaults(Defaults::positional([0])),
//! )?;
//!
//! let p = point.new_record([1, 2])?;           // z takes its default
//! assert_eq!(p.field("y")?, &2);
//! assert_eq!(p[2], 0);
//! assert_eq!(format!("{:?}", p), "Point(x=1, y=2, z=0)");
//!
//! let q = p.replace(kwargs!(z = 9))?;
//! assert_eq!(q, [1, 2, 9]);
//! assert_eq!(point.from_mapping(p.asdict(), true)?, p);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     make_record_type (factory)       │
//! ├─────────────────────────────────────┤
//! │  Descriptor Builder (descriptor)     │  validate, rename, dedupe,
//! │    uses ident::IdentPolicy           │  resolve defaults
//! ├─────────────────────────────────────┤
//! │  Type Synthesizer (records)          │  RecordType: lookups, constructors
//! │                                      │  Record: access, asdict, replace, repr
//! ├─────────────────────────────────────┤
//! │  Collaborators: types::Value, codec  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: Limits, delimiters, default reserved words
//! - [`ident`]: Identifier validation with a pluggable reserved-word policy
//! - [`descriptor`]: Field-list normalization and `RecordDescriptor`
//! - [`records`]: `RecordType`, `Record`, `Args`
//! - [`types`]: `Value`, a dynamic payload with total ordering
//! - [`codec`]: Byte encoding of `Record<Value>`
//! - [`error`]: `RecordError`

#[macro_use]
mod macros;

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ident;
pub mod records;
pub mod types;

pub use descriptor::{Defaults, FactoryOptions, FieldNames, FieldSpec, RecordDescriptor};
pub use error::{RecordError, Result};
pub use ident::{IdentIssue, IdentPolicy};
pub use records::{Args, Record, RecordType};
pub use types::Value;

/// Builds a record type from a type name and a field list.
///
/// `fields` is either one string of names separated by commas and/or
/// whitespace, or an explicit list of names. Fails with `InvalidIdentifier`,
/// `DuplicateField`, `InvalidDefaultsLayout` or `TooManyFields`; on failure
/// nothing is built.
pub fn make_record_type<V>(
    type_name: &str,
    fields: impl Into<FieldNames>,
    options: FactoryOptions<V>,
) -> Result<RecordType<V>> {
    let descriptor = descriptor::build(type_name, fields, options)?;
    Ok(RecordType::synthesize(descriptor))
}
