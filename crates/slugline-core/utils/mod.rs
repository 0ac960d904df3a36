//! Utility functions and shared types for slugline core
//!
//! Holds the crate-wide error type and the byte-to-text decoding used
//! before any grammar runs.

pub mod errors;
pub mod utf8;

pub use errors::CoreError;
pub use utf8::{decode_source, strip_bom, DecodedSource};
