//! # Record Types and Instances
//!
//! This module is the type synthesizer: it turns a `RecordDescriptor` into a
//! `RecordType`, and a `RecordType` into `Record` instances.
//!
//! ## Descriptor + Generic Engine
//!
//! A record type is not a new Rust type. It is one generic engine
//! (`RecordType<V>` / `Record<V>`) parameterized at runtime by a descriptor:
//!
//! ```text
//! RecordDescriptor<V> ──synthesize──> RecordType<V> ──new_record/call/...──> Record<V>
//!   names, slots,                      Arc { descriptor,                        { type handle,
//!   defaults                                 name -> slot map }                   Box<[V]> }
//! ```
//!
//! Each record keeps a handle to its type, used only to resolve names and to
//! render the repr. Values live in a boxed slice of exactly `field_count`
//! elements.
//!
//! ## Operations
//!
//! | Operation | Method | Complexity |
//! |-----------|--------|------------|
//! | construct by position | `RecordType::new_record` | O(N) |
//! | construct by keyword | `RecordType::from_kwargs`, `RecordType::call` | O(N + K) |
//! | construct from mapping | `RecordType::from_mapping` | O(N + K) |
//! | exact-length build | `RecordType::make` | O(N) |
//! | access by name | `Record::field` | O(1) |
//! | access by slot | `Record::at`, `record[i]` | O(1) |
//! | mapping snapshot | `Record::asdict`, `Record::asdict_with` | O(N) |
//! | functional update | `Record::replace` | O(N + K) |
//! | repr | `{:?}`, `Record::repr` | O(N) |
//!
//! ## Module Structure
//!
//! - `record_type`: `RecordType` and its constructors
//! - `record`: `Record` and its accessors and derived operations
//! - `args`: `Args`, the argument list of a constructor call

pub mod args;
pub mod record;
pub mod record_type;


pub use args::Args;
pub use record::Record;
pub use record_type::RecordType;
