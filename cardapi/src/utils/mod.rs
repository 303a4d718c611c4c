//! Utilities for cardapi: small, reusable helpers used across the crate.
//!
//! Hex formatting for traces and JSON output, the JSON rendering behind the
//! `Display` impls of the value objects, and argument validation.

pub mod hex;
pub mod json;
pub mod validate;

pub use hex::*;
