//! Output helpers.
//!
//! - date-stamped report directory + delimited file writing (`export`)

pub mod export;

pub use export::*;
