//! # Record Payload Types
//!
//! Records are generic over their value type. This module provides `Value`,
//! the dynamic payload used when field types are only known at runtime and
//! the only payload the byte codec understands.
//!
//! ## Usage
//!
//! ```ignore
//! use namedrec::types::Value;
//!
//! let v = Value::from("hello");
//! assert_eq!(v.as_str(), Some("hello"));
//! assert!(Value::Null < Value::Int(0));
//! ```

mod value;

pub use value::Value;
