//! Core domain entities for the IPO statistics pipeline.

pub mod types;

pub use types::*;
