//! # Record Factory Configuration Module
//!
//! This module centralizes the configuration constants for the record
//! factory. Limits that the descriptor builder and the synthesized
//! constructors both enforce live here so the two stages cannot drift
//! apart.
//!
//! ## Module Organization
//!
//! - [`constants`]: Numeric limits, delimiter sets and the default reserved-word table

pub mod constants;
pub use constants::*;
