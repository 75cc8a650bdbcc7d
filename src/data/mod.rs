//! Data acquisition.
//!
//! One source today: the public Jisilu HK IPO listing feed (`jisilu`).

pub mod jisilu;

pub use jisilu::*;
