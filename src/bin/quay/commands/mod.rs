//! Command implementations

pub mod checksum;
pub mod completions;
pub mod describe;
pub mod inspect;
pub mod resolve;
pub mod validate;
