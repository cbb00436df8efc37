//! # Record Codec
//!
//! Persistence for records lives outside the record core. This module is the
//! one collaborator the crate ships: a compact byte encoding for
//! `Record<Value>` that goes through field names (`asdict` on the way out,
//! `from_mapping` on the way in), so stored rows survive field reordering
//! and, in lenient mode, added or removed fields.
//!
//! ## Module Structure
//!
//! - `row`: `RowCodec` encode/decode

pub mod row;

pub use row::RowCodec;
