//! High-level operations.
//!
//! This module contains the implementation of Quay commands.

pub mod inspect;
pub mod resolve;

pub use inspect::{binary_target, checksums, inspect_target};
pub use resolve::{resolve, resolve_all};
